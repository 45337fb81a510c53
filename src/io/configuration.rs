//! Render constants and runtime configuration defaults

// Section geometry
/// Section width as a fraction of the working canvas width
pub const SECTION_WIDTH_DIVISOR: u32 = 8;
/// Dot radius as a fraction of the section width
pub const DOT_RADIUS_DIVISOR: i32 = 34;

// Per-tile sampling budgets
/// Color samples drawn from the doubled region before quantization
pub const STIPPLE_SAMPLE_COUNT: usize = 1000;
/// Dots painted per tile in the stipple style
pub const STIPPLE_DOT_COUNT: usize = 2000;
/// Dots painted per tile in the gradient style
pub const GRADIENT_DOT_COUNT: usize = 1000;
/// Target palette size for stipple quantization
pub const STIPPLE_PALETTE_SIZE: usize = 12;

// Matches the look of hand-applied dot texture; changing either value
// visibly alters the output
/// Probability that a near-ish match picks the closest palette entry
/// rather than the second closest
pub const NEARISH_PRIMARY_PROBABILITY: f64 = 0.75;

// Default values for configurable parameters
/// Fixed seed for reproducible renders
pub const DEFAULT_SEED: u64 = 42;
/// Working width the source is resized to before rendering
pub const DEFAULT_TARGET_WIDTH: u32 = 4000;
/// Preview window width in pixels
pub const DEFAULT_PREVIEW_WIDTH: usize = 800;

// Preview display settings
/// Poll rate of the preview window, one channel message per tick
pub const PREVIEW_FPS: usize = 20;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
