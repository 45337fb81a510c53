//! Diagonal row layout of overlapping section origins
//!
//! Sections tile the canvas in rows that climb from lower left to upper
//! right. A row starts off-canvas to the lower left and steps by a third of
//! the section size in each axis, so consecutive parallelograms interlock
//! edge to edge. Origins may be negative or exceed the canvas; the overflow
//! is intentional and guarantees coverage at the diagonal seams.

/// Origin of one section in canvas coordinates, possibly off-canvas
pub type SectionOrigin = (i32, i32);

/// Enumerate one diagonal row of section origins
///
/// Starting from (`start_x`, `start_y`), emits each origin whose bounding
/// box intersects the canvas, advancing by (`section_w`/3, -`section_h`/3)
/// until the walk leaves the canvas to the right or above.
///
/// At least one section dimension must be 3 or more so the walk actually
/// advances; the compositor's section sizing guarantees this.
///
/// # Panics
///
/// Debug builds assert that both step sizes are not zero.
pub fn row(
    start_x: i32,
    start_y: i32,
    section_w: i32,
    section_h: i32,
    canvas_w: i32,
    canvas_h: i32,
) -> Vec<SectionOrigin> {
    debug_assert!(
        section_w >= 3 || section_h >= 3,
        "a zero step in both axes would never leave the canvas"
    );

    let mut origins = Vec::new();
    let mut x = start_x;
    let mut y = start_y;

    while x < canvas_w && y + section_h >= 0 {
        if x + section_w >= 0 && y < canvas_h {
            origins.push((x, y));
        }
        x += section_w / 3;
        y -= section_h / 3;
    }

    origins
}

/// Vertical step between consecutive rows
///
/// A third more than the section height, minus one pixel of overlap so
/// integer rounding never opens a seam between rows.
pub const fn row_advance(section_h: i32) -> i32 {
    section_h * 4 / 3 - 1
}
