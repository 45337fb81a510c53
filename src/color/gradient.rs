//! Linear two-color gradients
//!
//! The gradient tile style fills each section with a vertical ramp between
//! two sampled colors, one gradient element per pixel row.

use crate::color::Rgb;

/// Interpolate linearly from `start` to `finish` over `steps` colors
///
/// Element `t` is `start + t/(steps-1) * (finish - start)` per channel,
/// truncated to an integer; element 0 is exactly `start` and the final
/// element lands on `finish` within one unit of rounding. A single step
/// yields `[start]` and zero steps yield an empty gradient.
pub fn linear(start: Rgb, finish: Rgb, steps: usize) -> Vec<Rgb> {
    if steps == 0 {
        return Vec::new();
    }
    if steps == 1 {
        return vec![start];
    }

    let span = (steps - 1) as f64;
    (0..steps)
        .map(|step| {
            let fraction = step as f64 / span;
            [
                channel(start[0], finish[0], fraction),
                channel(start[1], finish[1], fraction),
                channel(start[2], finish[2], fraction),
            ]
        })
        .collect()
}

fn channel(start: u8, finish: u8, fraction: f64) -> u8 {
    let value = (f64::from(finish) - f64::from(start)).mul_add(fraction, f64::from(start));
    value as u8
}

#[cfg(test)]
mod tests {
    use super::linear;

    #[test]
    fn test_gradient_has_exact_length_and_endpoints() {
        let ramp = linear([0, 10, 250], [100, 200, 0], 64);
        assert_eq!(ramp.len(), 64);
        assert_eq!(ramp.first(), Some(&[0, 10, 250]));

        let last = ramp.last().copied().unwrap_or_default();
        for (channel, expected) in last.iter().zip([100u8, 200, 0]) {
            assert!(
                channel.abs_diff(expected) <= 1,
                "final element {last:?} should land on the finish color"
            );
        }
    }

    #[test]
    fn test_gradient_is_monotonic_per_channel() {
        let ramp = linear([0, 255, 100], [255, 0, 100], 32);
        for pair in ramp.windows(2) {
            assert!(pair[1][0] >= pair[0][0]);
            assert!(pair[1][1] <= pair[0][1]);
            assert_eq!(pair[1][2], 100);
        }
    }

    #[test]
    fn test_single_step_gradient_is_just_the_start() {
        assert_eq!(linear([9, 8, 7], [200, 200, 200], 1), vec![[9, 8, 7]]);
    }

    #[test]
    fn test_zero_step_gradient_is_empty() {
        assert!(linear([0, 0, 0], [1, 1, 1], 0).is_empty());
    }
}
