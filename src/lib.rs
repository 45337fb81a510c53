//! Painterly mosaic rendering inspired by dot-stippled parallelogram tile
//! paintings
//!
//! The system re-renders a source photograph as overlapping parallelogram
//! sections laid out in diagonal rows. Each section is painted on its own
//! small raster, either from a quantized per-tile palette or a vertical
//! color gradient, textured with thousands of sampled dots, then pasted
//! onto the canvas through a shared parallelogram mask. Snapshots stream
//! to a live preview window while the mosaic assembles.

#![forbid(unsafe_code)]

/// Color sampling, quantization, and gradient construction
pub mod color;
/// Input/output operations, orchestration, and error handling
pub mod io;
/// Tiling geometry and the per-tile rendering pipeline
pub mod render;

pub use io::error::{RenderError, Result};
