//! Command-line interface and render orchestration
//!
//! Wires the configuration surface to the core pipeline: loads and adjusts
//! the source once, spawns the render worker, and blocks the main thread
//! on the preview window until the worker signals completion. The worker
//! persists the output regardless of the display lifecycle, so closing the
//! window early never loses the render.

use crate::io::configuration::{
    DEFAULT_PREVIEW_WIDTH, DEFAULT_SEED, DEFAULT_TARGET_WIDTH, OUTPUT_SUFFIX,
};
use crate::io::error::{RenderError, Result};
use crate::io::image::{Enhancements, export_canvas, load_source};
use crate::io::palette::load_palette;
use crate::io::preview;
use crate::io::progress::ProgressManager;
use crate::render::tile::{TileConfig, TileStyle};
use crate::render::Compositor;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::thread;

/// Tile painting style selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    /// Quantized palette fill with near-ish matched dots
    Stipple,
    /// Vertical gradient fill with sampled dots
    Gradient,
}

impl From<StyleArg> for TileStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Stipple => Self::Stipple,
            StyleArg::Gradient => Self::Gradient,
        }
    }
}

#[derive(Parser)]
#[command(name = "paratile")]
#[command(
    author,
    version,
    about = "Re-render a photograph as a painterly mosaic of dot-stippled parallelogram tiles"
)]
/// Command-line arguments for the mosaic renderer
pub struct Cli {
    /// Source image to re-render
    #[arg(value_name = "IMAGE")]
    pub source: PathBuf,

    /// Tile painting style
    #[arg(long, value_enum, default_value_t = StyleArg::Stipple)]
    pub style: StyleArg,

    /// Working width the source is resized to before rendering
    #[arg(short, long, default_value_t = DEFAULT_TARGET_WIDTH)]
    pub width: u32,

    /// Random seed for reproducible renders
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output path (defaults to the input name with a suffix, as JPEG)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fixed palette file (#rrggbb lines) the gradient style snaps to
    #[arg(short, long)]
    pub palette: Option<PathBuf>,

    /// Saturation factor applied to the source before rendering
    #[arg(long, default_value_t = 1.0)]
    pub color: f32,

    /// Contrast factor applied to the source before rendering
    #[arg(long, default_value_t = 1.0)]
    pub contrast: f32,

    /// Brightness factor applied to the source before rendering
    #[arg(long, default_value_t = 1.0)]
    pub brightness: f32,

    /// Preview window width in pixels
    #[arg(long, default_value_t = DEFAULT_PREVIEW_WIDTH)]
    pub preview_width: usize,

    /// Render headless without opening the preview window
    #[arg(short, long)]
    pub no_preview: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Override the per-tile color sample count
    #[arg(long)]
    pub samples: Option<usize>,

    /// Override the per-tile dot count
    #[arg(long)]
    pub dots: Option<usize>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    fn enhancements(&self) -> Enhancements {
        Enhancements {
            color: self.color,
            contrast: self.contrast,
            brightness: self.brightness,
        }
    }

    fn tile_config(&self, fixed_palette: Option<Vec<crate::color::Rgb>>) -> TileConfig {
        let mut config = TileConfig::for_style(self.style.into());
        if let Some(samples) = self.samples {
            config.sample_count = samples;
        }
        if let Some(dots) = self.dots {
            config.dot_count = dots;
        }
        config.fixed_palette = fixed_palette;
        config
    }
}

/// Orchestrates one render: source in, preview alongside, mosaic out
pub struct MosaicProcessor {
    cli: Cli,
}

impl MosaicProcessor {
    /// Create a processor from parsed CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the render to completion
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be loaded, the render
    /// configuration is invalid, the output cannot be written, or the
    /// preview window fails.
    pub fn process(&self) -> Result<()> {
        let source = load_source(&self.cli.source, self.cli.width, self.cli.enhancements())?;
        let fixed_palette = match &self.cli.palette {
            Some(path) => Some(load_palette(path)?),
            None => None,
        };

        let output_path = self.output_path();
        let preview_size = preview_size(&source, self.cli.preview_width);
        let (sender, window) = preview::channel(preview_size.0, preview_size.1);

        let initial = source.clone();
        let mut compositor =
            Compositor::new(source, self.cli.tile_config(fixed_palette), self.cli.seed)?;
        let progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressManager::new(compositor.estimated_rows()));

        // The closure mutates the captured compositor, so calling it in the
        // headless branch needs a mutable binding
        let mut worker = move || -> Result<()> {
            let result = compositor
                .render(&sender, progress.as_ref())
                .and_then(|canvas| export_canvas(&canvas, &output_path));
            if let Some(ref pm) = progress {
                pm.finish();
            }
            sender.close();
            result
        };

        if self.cli.no_preview {
            drop(window);
            return worker();
        }

        let handle = thread::spawn(worker);
        // A failed or closed window must not abandon the worker; the
        // render still completes and persists its output
        let window_result = window.run(&initial);
        handle.join().map_err(|_| RenderError::Worker {
            reason: "render thread panicked".to_string(),
        })??;
        window_result
    }

    fn output_path(&self) -> PathBuf {
        if let Some(path) = &self.cli.output {
            return path.clone();
        }

        let stem = self.cli.source.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.jpg", stem.to_string_lossy(), OUTPUT_SUFFIX);

        match self.cli.source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(output_name),
            _ => PathBuf::from(output_name),
        }
    }
}

/// Preview size at the configured width, preserving the source aspect
fn preview_size(source: &image::RgbImage, preview_width: usize) -> (usize, usize) {
    let width = preview_width.max(1);
    let height = (source.height() as usize * width / source.width().max(1) as usize).max(1);
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::{Cli, MosaicProcessor, StyleArg, preview_size};
    use clap::Parser;
    use image::RgbImage;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn test_defaults_match_configuration_constants() {
        let cli = parse(&["paratile", "photo.jpg"]);
        assert_eq!(cli.style, StyleArg::Stipple);
        assert_eq!(cli.width, 4000);
        assert_eq!(cli.seed, 42);
        assert!(!cli.no_preview);
        assert!(cli.should_show_progress());
    }

    #[test]
    fn test_style_and_count_overrides_flow_into_tile_config() {
        let cli = parse(&[
            "paratile",
            "photo.jpg",
            "--style",
            "gradient",
            "--samples",
            "10",
            "--dots",
            "25",
        ]);
        let config = cli.tile_config(Some(vec![[1, 2, 3]]));
        assert_eq!(config.style, crate::render::TileStyle::Gradient);
        assert_eq!(config.sample_count, 10);
        assert_eq!(config.dot_count, 25);
        assert_eq!(config.fixed_palette, Some(vec![[1, 2, 3]]));
    }

    #[test]
    fn test_output_path_appends_suffix_beside_input() {
        let cli = parse(&["paratile", "shots/sunset.png"]);
        let processor = MosaicProcessor::new(cli);
        assert_eq!(
            processor.output_path(),
            PathBuf::from("shots/sunset_mosaic.jpg")
        );
    }

    #[test]
    fn test_explicit_output_path_wins() {
        let cli = parse(&["paratile", "sunset.png", "--output", "/tmp/final.jpg"]);
        let processor = MosaicProcessor::new(cli);
        assert_eq!(processor.output_path(), PathBuf::from("/tmp/final.jpg"));
    }

    #[test]
    fn test_preview_size_preserves_aspect() {
        let source = RgbImage::new(4000, 3000);
        assert_eq!(preview_size(&source, 800), (800, 600));
    }

    #[test]
    fn test_headless_process_renders_and_writes_the_output() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source_path = dir.path().join("source.png");
        let output_path = dir.path().join("mosaic.png");
        RgbImage::from_pixel(32, 24, image::Rgb([90, 140, 60]))
            .save(&source_path)
            .expect("source should save");

        let cli = parse(&[
            "paratile",
            source_path.to_str().expect("utf-8 path"),
            "--no-preview",
            "--quiet",
            "--width",
            "120",
            "--samples",
            "10",
            "--dots",
            "5",
            "--output",
            output_path.to_str().expect("utf-8 path"),
        ]);
        MosaicProcessor::new(cli)
            .process()
            .expect("headless render should complete");

        let canvas = image::open(&output_path)
            .expect("output should reload")
            .into_rgb8();
        assert_eq!(canvas.dimensions(), (120, 90));
    }
}
