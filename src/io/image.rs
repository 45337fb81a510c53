//! Source image loading, pre-render adjustment, and canvas export
//!
//! The source is decoded once, resized to the working width, and run
//! through an enhancement chain (saturation, contrast, brightness) before
//! the render starts; it is read-only afterwards. Each enhancement factor
//! interpolates between a degenerate image and the original: 0.0 is the
//! degenerate (grayscale, flat mean gray, black), 1.0 is the original, and
//! values above 1.0 push past it.

use crate::io::error::{RenderError, Result, invalid_source};
use image::imageops::FilterType;
use image::{ImageReader, RgbImage, imageops};
use std::path::Path;

/// Pre-render enhancement factors, applied color then contrast then
/// brightness
#[derive(Debug, Clone, Copy)]
pub struct Enhancements {
    /// Saturation factor (0.0 grayscale, 1.0 unchanged)
    pub color: f32,
    /// Contrast factor (0.0 flat gray, 1.0 unchanged)
    pub contrast: f32,
    /// Brightness factor (0.0 black, 1.0 unchanged)
    pub brightness: f32,
}

impl Default for Enhancements {
    fn default() -> Self {
        Self {
            color: 1.0,
            contrast: 1.0,
            brightness: 1.0,
        }
    }
}

impl Enhancements {
    fn is_identity(self) -> bool {
        near_one(self.color) && near_one(self.contrast) && near_one(self.brightness)
    }
}

fn near_one(factor: f32) -> bool {
    (factor - 1.0).abs() < f32::EPSILON
}

/// Load, resize, and adjust a source image for rendering
///
/// Decodes any format the `image` crate understands, converts to RGB,
/// resizes to `target_width` preserving aspect ratio, then applies the
/// enhancement chain.
///
/// # Errors
///
/// Returns `FileSystem` when the file cannot be opened, `ImageLoad` when
/// decoding fails, and `InvalidSourceData` for an image with no pixels.
pub fn load_source(path: &Path, target_width: u32, factors: Enhancements) -> Result<RgbImage> {
    let decoded = ImageReader::open(path)
        .map_err(|e| RenderError::FileSystem {
            path: path.to_path_buf(),
            operation: "open image",
            source: e,
        })?
        .decode()
        .map_err(|e| RenderError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;

    let source = decoded.to_rgb8();
    if source.width() == 0 || source.height() == 0 {
        return Err(invalid_source(format!(
            "'{}' decoded to an empty image",
            path.display()
        )));
    }

    let resized = resize_to_width(&source, target_width);
    Ok(enhance(&resized, factors))
}

/// Resize to the given width, preserving aspect ratio
///
/// A zero target or a matching width returns the image unchanged. Height
/// is floored but never below one pixel row.
pub fn resize_to_width(source: &RgbImage, target_width: u32) -> RgbImage {
    if target_width == 0 || target_width == source.width() {
        return source.clone();
    }
    let target_height = ((u64::from(source.height()) * u64::from(target_width))
        / u64::from(source.width()))
    .max(1) as u32;
    imageops::resize(source, target_width, target_height, FilterType::CatmullRom)
}

/// Apply the enhancement chain: color, then contrast, then brightness
pub fn enhance(source: &RgbImage, factors: Enhancements) -> RgbImage {
    if factors.is_identity() {
        return source.clone();
    }

    let mut adjusted = source.clone();

    if !near_one(factors.color) {
        for pixel in adjusted.pixels_mut() {
            let gray = luminance(pixel.0);
            for channel in pixel.0.iter_mut() {
                *channel = lerp(gray, f32::from(*channel), factors.color);
            }
        }
    }

    if !near_one(factors.contrast) {
        let mean = mean_luminance(&adjusted);
        for pixel in adjusted.pixels_mut() {
            for channel in pixel.0.iter_mut() {
                *channel = lerp(mean, f32::from(*channel), factors.contrast);
            }
        }
    }

    if !near_one(factors.brightness) {
        for pixel in adjusted.pixels_mut() {
            for channel in pixel.0.iter_mut() {
                *channel = lerp(0.0, f32::from(*channel), factors.brightness);
            }
        }
    }

    adjusted
}

/// Save the finished canvas, creating parent directories as needed
///
/// # Errors
///
/// Returns `FileSystem` when the parent directory cannot be created and
/// `ImageExport` when encoding or writing fails.
pub fn export_canvas(canvas: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| RenderError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas.save(path).map_err(|e| RenderError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Rec. 601 luminance, the grayscale PIL-style enhancement works against
fn luminance(rgb: [u8; 3]) -> f32 {
    0.114f32.mul_add(
        f32::from(rgb[2]),
        0.299f32.mul_add(f32::from(rgb[0]), 0.587 * f32::from(rgb[1])),
    )
}

fn mean_luminance(source: &RgbImage) -> f32 {
    let count = source.width() as u64 * source.height() as u64;
    if count == 0 {
        return 0.0;
    }
    let total: f64 = source
        .pixels()
        .map(|pixel| f64::from(luminance(pixel.0)))
        .sum();
    (total / count as f64) as f32
}

fn lerp(base: f32, value: f32, factor: f32) -> u8 {
    (value - base).mul_add(factor, base).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::{Enhancements, enhance, export_canvas, load_source, resize_to_width};
    use image::RgbImage;

    fn gradient_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        })
    }

    #[test]
    fn test_resize_preserves_aspect_ratio() {
        let source = gradient_image(400, 300);
        let resized = resize_to_width(&source, 200);
        assert_eq!(resized.dimensions(), (200, 150));
    }

    #[test]
    fn test_resize_to_same_or_zero_width_is_identity() {
        let source = gradient_image(64, 48);
        assert_eq!(resize_to_width(&source, 64).dimensions(), (64, 48));
        assert_eq!(resize_to_width(&source, 0).dimensions(), (64, 48));
    }

    #[test]
    fn test_identity_enhancement_leaves_pixels_untouched() {
        let source = gradient_image(32, 32);
        let adjusted = enhance(&source, Enhancements::default());
        assert_eq!(source, adjusted);
    }

    #[test]
    fn test_zero_color_factor_desaturates() {
        let source = RgbImage::from_pixel(8, 8, image::Rgb([200, 40, 90]));
        let adjusted = enhance(
            &source,
            Enhancements {
                color: 0.0,
                ..Default::default()
            },
        );
        let pixel = adjusted.get_pixel(4, 4).0;
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }

    #[test]
    fn test_brightness_factor_scales_channels() {
        let source = RgbImage::from_pixel(4, 4, image::Rgb([100, 50, 200]));
        let adjusted = enhance(
            &source,
            Enhancements {
                brightness: 0.5,
                ..Default::default()
            },
        );
        assert_eq!(adjusted.get_pixel(0, 0).0, [50, 25, 100]);
    }

    #[test]
    fn test_brightness_clamps_at_channel_maximum() {
        let source = RgbImage::from_pixel(4, 4, image::Rgb([200, 200, 200]));
        let adjusted = enhance(
            &source,
            Enhancements {
                brightness: 2.0,
                ..Default::default()
            },
        );
        assert_eq!(adjusted.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_zero_contrast_flattens_to_mean() {
        let mut source = RgbImage::from_pixel(2, 1, image::Rgb([0, 0, 0]));
        source.put_pixel(1, 0, image::Rgb([200, 200, 200]));
        let adjusted = enhance(
            &source,
            Enhancements {
                contrast: 0.0,
                ..Default::default()
            },
        );
        assert_eq!(adjusted.get_pixel(0, 0).0, adjusted.get_pixel(1, 0).0);
    }

    #[test]
    fn test_export_and_reload_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("canvas.png");

        let canvas = gradient_image(20, 10);
        export_canvas(&canvas, &path).expect("export should succeed");

        let reloaded =
            load_source(&path, 0, Enhancements::default()).expect("reload should succeed");
        assert_eq!(reloaded, canvas);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_source(
            std::path::Path::new("/nonexistent/missing.png"),
            0,
            Enhancements::default(),
        );
        assert!(result.is_err());
    }
}
