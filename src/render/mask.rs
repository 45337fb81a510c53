//! Parallelogram alpha mask construction
//!
//! Every section in a render shares one mask: a filled parallelogram whose
//! edges run diagonally so that adjacent sections, offset per the layout
//! planner, interlock without gaps. The mask depends only on the section
//! size, so it is built once per render and reused for every paste.

use ndarray::Array2;

/// Fully opaque mask value
pub const OPAQUE: u8 = 255;
/// Fully transparent mask value
pub const TRANSPARENT: u8 = 0;

/// Build the parallelogram mask for a section bounding box of (w, h)
///
/// The parallelogram has vertices (w/3, 0), (w, 2h/3), (2w/3, h), (0, h/3)
/// in integer arithmetic. Pixels inside or on the boundary are opaque,
/// everything else transparent. Indexed as `mask[[y, x]]`.
pub fn build(width: usize, height: usize) -> Array2<u8> {
    let w = width as i64;
    let h = height as i64;
    let vertices = [(w / 3, 0), (w, h * 2 / 3), (w * 2 / 3, h), (0, h / 3)];

    let mut mask = Array2::from_elem((height, width), TRANSPARENT);
    for ((y, x), value) in mask.indexed_iter_mut() {
        if contains(&vertices, x as i64, y as i64) {
            *value = OPAQUE;
        }
    }
    mask
}

/// Point-in-convex-polygon test via half-plane inclusion
///
/// The vertices wind consistently in raster coordinates, so a point is
/// inside when every edge cross product is non-negative.
fn contains(vertices: &[(i64, i64); 4], x: i64, y: i64) -> bool {
    vertices.iter().enumerate().all(|(i, &(x0, y0))| {
        let (x1, y1) = vertices[(i + 1) % vertices.len()];
        (x1 - x0) * (y - y0) - (y1 - y0) * (x - x0) >= 0
    })
}
