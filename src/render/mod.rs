//! Tiling geometry and the per-tile rendering pipeline

/// Render driver: section sizing, row iteration, masked pasting
pub mod compositor;
/// Diagonal row layout of overlapping section origins
pub mod layout;
/// Parallelogram alpha mask construction
pub mod mask;
/// Per-tile painting in the stipple and gradient styles
pub mod tile;

pub use compositor::Compositor;
pub use tile::{TileConfig, TileStyle};
