//! Modified median-cut quantization and palette matching
//!
//! Each tile reduces a multiset of sampled colors to a small representative
//! palette by recursively splitting color space along the channel with the
//! greatest range. Dot colors then snap to the palette either exactly
//! (nearest match) or stochastically (near-ish match), the latter trading a
//! little color accuracy for the look of hand-applied paint.

use crate::color::Rgb;
use crate::io::configuration::NEARISH_PRIMARY_PROBABILITY;
use rand::Rng;

/// Reduce a sample multiset to at most `max_colors` representative colors
///
/// Buckets are split on the channel with the widest range, at the median of
/// that channel, until the target count is reached or no bucket can be
/// split further. Each representative is the channel-wise mean of its
/// bucket. The result is ordered by descending bucket population, so the
/// first entry is the dominant color of the sample set.
///
/// Degenerate input degrades gracefully: an all-identical sample set yields
/// a single-color palette, and an empty sample set yields `[black]` rather
/// than an empty palette.
pub fn quantize(samples: &[Rgb], max_colors: usize) -> Vec<Rgb> {
    if samples.is_empty() {
        return vec![[0, 0, 0]];
    }

    let mut buckets: Vec<Vec<Rgb>> = vec![samples.to_vec()];
    while buckets.len() < max_colors.max(1) {
        let Some((index, channel)) = widest_bucket(&buckets) else {
            break;
        };
        let bucket = buckets.swap_remove(index);
        let (lower, upper) = split_bucket(bucket, channel);
        buckets.push(lower);
        buckets.push(upper);
    }

    buckets.sort_by(|a, b| b.len().cmp(&a.len()));
    buckets.iter().map(|bucket| mean_color(bucket)).collect()
}

/// Return the palette entry closest to `color` in Euclidean RGB distance
///
/// Total over any palette: an empty palette returns `color` unchanged.
pub fn nearest(color: Rgb, palette: &[Rgb]) -> Rgb {
    palette
        .iter()
        .copied()
        .min_by(|a, b| distance(color, *a).total_cmp(&distance(color, *b)))
        .unwrap_or(color)
}

/// Stochastic nearest-or-second-nearest palette match
///
/// Ranks a copy of the palette by ascending distance to `color` and picks
/// the closest entry with probability 0.75, otherwise the second closest.
/// The palette itself is never reordered, so shared palettes stay intact
/// across repeated calls.
pub fn nearish<R: Rng>(color: Rgb, palette: &[Rgb], rng: &mut R) -> Rgb {
    let mut ranked = palette.to_vec();
    ranked.sort_by(|a, b| distance(color, *a).total_cmp(&distance(color, *b)));

    let index = usize::from(rng.random::<f64>() >= NEARISH_PRIMARY_PROBABILITY);
    ranked
        .get(index)
        .or_else(|| ranked.first())
        .copied()
        .unwrap_or(color)
}

/// Euclidean distance between two colors in RGB space
fn distance(c0: Rgb, c1: Rgb) -> f64 {
    c0.iter()
        .zip(c1.iter())
        .map(|(&a, &b)| {
            let delta = f64::from(a) - f64::from(b);
            delta * delta
        })
        .sum::<f64>()
        .sqrt()
}

/// Find the splittable bucket with the single widest channel range
///
/// Returns `None` when every bucket is uniform or has fewer than two
/// samples, which ends the recursion early with a smaller palette.
fn widest_bucket(buckets: &[Vec<Rgb>]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, u8)> = None;
    for (index, bucket) in buckets.iter().enumerate() {
        if bucket.len() < 2 {
            continue;
        }
        let (channel, range) = widest_channel(bucket);
        if range == 0 {
            continue;
        }
        if best.is_none_or(|(_, _, best_range)| range > best_range) {
            best = Some((index, channel, range));
        }
    }
    best.map(|(index, channel, _)| (index, channel))
}

/// The channel with the greatest value range within one bucket
fn widest_channel(bucket: &[Rgb]) -> (usize, u8) {
    let mut min = [u8::MAX; 3];
    let mut max = [u8::MIN; 3];
    for color in bucket {
        for channel in 0..3 {
            let value = color.get(channel).copied().unwrap_or(0);
            if let Some(entry) = min.get_mut(channel) {
                *entry = (*entry).min(value);
            }
            if let Some(entry) = max.get_mut(channel) {
                *entry = (*entry).max(value);
            }
        }
    }
    (0..3)
        .map(|channel| {
            let lo = min.get(channel).copied().unwrap_or(0);
            let hi = max.get(channel).copied().unwrap_or(0);
            (channel, hi.saturating_sub(lo))
        })
        .max_by_key(|&(_, range)| range)
        .unwrap_or((0, 0))
}

/// Split one bucket at the median of the given channel
fn split_bucket(mut bucket: Vec<Rgb>, channel: usize) -> (Vec<Rgb>, Vec<Rgb>) {
    bucket.sort_by_key(|color| color.get(channel).copied().unwrap_or(0));
    let midpoint = bucket.len() / 2;
    let upper = bucket.split_off(midpoint);
    (bucket, upper)
}

/// Channel-wise mean of a bucket, the bucket's representative color
fn mean_color(bucket: &[Rgb]) -> Rgb {
    if bucket.is_empty() {
        return [0, 0, 0];
    }
    let mut sums = [0u64; 3];
    for color in bucket {
        for (sum, &value) in sums.iter_mut().zip(color.iter()) {
            *sum += u64::from(value);
        }
    }
    let count = bucket.len() as u64;
    [
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::{nearest, nearish, quantize};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_quantize_single_color_sample_set_returns_that_color() {
        let samples = vec![[90, 45, 200]; 1000];
        let palette = quantize(&samples, 12);
        assert_eq!(palette, vec![[90, 45, 200]]);
    }

    #[test]
    fn test_quantize_never_returns_empty_palette() {
        assert_eq!(quantize(&[], 12).len(), 1);
        assert_eq!(quantize(&[[7, 7, 7]], 0).len(), 1);
    }

    #[test]
    fn test_quantize_separates_distinct_clusters() {
        let mut samples = vec![[0, 0, 0]; 500];
        samples.extend(vec![[255, 255, 255]; 500]);
        let palette = quantize(&samples, 2);
        assert_eq!(palette.len(), 2);
        assert!(palette.contains(&[0, 0, 0]));
        assert!(palette.contains(&[255, 255, 255]));
    }

    #[test]
    fn test_quantize_respects_palette_size_bound() {
        let samples: Vec<_> = (0u16..1000)
            .map(|i| [(i % 256) as u8, (i / 4 % 256) as u8, (i / 7 % 256) as u8])
            .collect();
        let palette = quantize(&samples, 12);
        assert!(!palette.is_empty());
        assert!(palette.len() <= 12);
    }

    #[test]
    fn test_quantize_orders_dominant_color_first() {
        let mut samples = vec![[200, 0, 0]; 900];
        samples.extend(vec![[0, 0, 200]; 100]);
        let palette = quantize(&samples, 2);
        assert_eq!(palette.first(), Some(&[200, 0, 0]));
    }

    #[test]
    fn test_nearest_picks_minimum_distance_entry() {
        let palette = vec![[0, 0, 0], [255, 255, 255]];
        assert_eq!(nearest([10, 10, 10], &palette), [0, 0, 0]);
        assert_eq!(nearest([200, 180, 250], &palette), [255, 255, 255]);
    }

    #[test]
    fn test_nearest_on_empty_palette_returns_query() {
        assert_eq!(nearest([1, 2, 3], &[]), [1, 2, 3]);
    }

    #[test]
    fn test_nearish_splits_between_top_two_at_three_to_one() {
        let palette = vec![[250, 250, 250], [0, 0, 0], [128, 128, 128]];
        let mut rng = StdRng::seed_from_u64(7);

        let trials = 10_000;
        let mut closest_hits = 0u32;
        let mut second_hits = 0u32;
        for _ in 0..trials {
            match nearish([10, 10, 10], &palette, &mut rng) {
                [0, 0, 0] => closest_hits += 1,
                [128, 128, 128] => second_hits += 1,
                other => panic!("unexpected palette pick {other:?}"),
            }
        }

        let closest_rate = f64::from(closest_hits) / f64::from(trials);
        assert!(
            (0.72..=0.78).contains(&closest_rate),
            "closest pick rate {closest_rate} outside 75% +/- 3%"
        );
        assert_eq!(closest_hits + second_hits, trials);
    }

    #[test]
    fn test_nearish_does_not_reorder_shared_palette() {
        let palette = vec![[255, 255, 255], [0, 0, 0]];
        let before = palette.clone();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            nearish([5, 5, 5], &palette, &mut rng);
        }
        assert_eq!(palette, before);
    }

    #[test]
    fn test_nearish_single_entry_palette_always_returns_it() {
        let palette = vec![[42, 42, 42]];
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            assert_eq!(nearish([0, 0, 0], &palette, &mut rng), [42, 42, 42]);
        }
    }
}
