//! Clamped pixel sampling from the source photograph
//!
//! Tiles deliberately sample past their own bounds to pick up color from
//! neighboring regions, so lookups are total over all integer coordinates:
//! out-of-range positions read the nearest edge or corner pixel instead.

use crate::color::Rgb;
use image::RgbImage;

/// Read the pixel at (x, y), clamping each axis to the image bounds
///
/// Any integer input returns a valid in-bounds color. The two axes clamp
/// independently, so a far off-canvas corner reads the nearest corner pixel.
pub fn sample(image: &RgbImage, x: i32, y: i32) -> Rgb {
    let max_x = image.width().saturating_sub(1) as i32;
    let max_y = image.height().saturating_sub(1) as i32;
    let cx = x.clamp(0, max_x) as u32;
    let cy = y.clamp(0, max_y) as u32;
    image.get_pixel(cx, cy).0
}
