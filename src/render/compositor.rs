//! Render driver assembling the full mosaic canvas
//!
//! Computes the shared section geometry, then walks diagonal rows of
//! overlapping parallelogram tiles from the lower left upward, painting
//! each section and pasting it onto the canvas through the shared mask.
//! After every paste a snapshot of the canvas streams to the preview sink,
//! so the mosaic visibly assembles while the render runs.

use crate::color::Rgb;
use crate::io::configuration::SECTION_WIDTH_DIVISOR;
use crate::io::error::{Result, invalid_parameter};
use crate::io::preview::PreviewSender;
use crate::io::progress::ProgressManager;
use crate::render::tile::{TileConfig, TilePainter};
use crate::render::{layout, mask};
use image::RgbImage;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Owns the output canvas for the duration of one render pass
pub struct Compositor {
    source: RgbImage,
    config: TileConfig,
    rng: StdRng,
    section_w: i32,
    section_h: i32,
}

impl Compositor {
    /// Create a compositor over an adjusted source image
    ///
    /// Section size is an eighth of the source width at a fixed 3:2 aspect,
    /// independent of the source aspect ratio.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the source is too narrow to produce
    /// sections the diagonal layout can step through (under 24 pixels wide)
    /// or has no rows at all.
    pub fn new(source: RgbImage, config: TileConfig, seed: u64) -> Result<Self> {
        let section_w = (source.width() / SECTION_WIDTH_DIVISOR) as i32;
        let section_h = section_w * 2 / 3;
        if section_w < 3 {
            return Err(invalid_parameter(
                "width",
                &source.width(),
                &format!("source must be at least {} pixels wide", SECTION_WIDTH_DIVISOR * 3),
            ));
        }
        if source.height() == 0 {
            return Err(invalid_parameter("height", &0, &"source has no pixel rows"));
        }

        Ok(Self {
            source,
            config,
            rng: StdRng::seed_from_u64(seed),
            section_w,
            section_h,
        })
    }

    /// Section size shared by every tile and the mask, as (width, height)
    pub const fn section_size(&self) -> (i32, i32) {
        (self.section_w, self.section_h)
    }

    /// Upper bound on the number of rows a render will walk
    ///
    /// The first row starts at most two section heights above the canvas
    /// and each row advances by a fixed step, so the bound is exact up to
    /// the final empty row.
    pub fn estimated_rows(&self) -> u64 {
        let span = self.source.height() as i32 + self.section_h * 2;
        let advance = layout::row_advance(self.section_h);
        (span / advance + 2) as u64
    }

    /// Run the full render pass
    ///
    /// Streams a canvas snapshot to `preview` after every pasted tile and
    /// reports each completed row to `progress`. Returns the finished
    /// canvas, sized exactly like the source.
    ///
    /// # Errors
    ///
    /// Currently infallible beyond construction; the `Result` return keeps
    /// the driver signature stable for callers that chain export.
    pub fn render(
        &mut self,
        preview: &PreviewSender,
        progress: Option<&ProgressManager>,
    ) -> Result<RgbImage> {
        let canvas_w = self.source.width() as i32;
        let canvas_h = self.source.height() as i32;
        let mut canvas = RgbImage::new(self.source.width(), self.source.height());

        let section_mask = mask::build(self.section_w as usize, self.section_h as usize);
        let painter = TilePainter::new(
            &self.source,
            self.section_w as u32,
            self.section_h as u32,
            self.config.clone(),
        );

        // Rows start one to two sections off-canvas to the upper left so
        // overflow tiles cover the seams at the borders
        let x_init = -(f64::from(self.section_w) * (1.0 + self.rng.random::<f64>())) as i32;
        let mut y_init = -(f64::from(self.section_h) * (1.0 + self.rng.random::<f64>())) as i32;

        let mut origins = layout::row(
            x_init,
            y_init,
            self.section_w,
            self.section_h,
            canvas_w,
            canvas_h,
        );

        // A negative start can still yield an empty row that must be
        // retried further down, so emptiness alone does not terminate
        while y_init < 0 || !origins.is_empty() {
            for &(x, y) in &origins {
                let tile = painter.paint((x, y), &mut self.rng);
                paste(&mut canvas, &tile, &section_mask, x, y);
                preview.send_frame(&canvas);
            }

            if let Some(pm) = progress {
                pm.complete_row(origins.len());
            }

            y_init += layout::row_advance(self.section_h);
            origins = layout::row(
                x_init,
                y_init,
                self.section_w,
                self.section_h,
                canvas_w,
                canvas_h,
            );
        }

        Ok(canvas)
    }
}

/// Paste a tile onto the canvas through the parallelogram mask
///
/// Opaque mask pixels overwrite the canvas; transparent pixels leave it
/// untouched. Later pastes win at overlaps, so row order decides seams.
fn paste(canvas: &mut RgbImage, tile: &RgbImage, section_mask: &Array2<u8>, ox: i32, oy: i32) {
    let canvas_w = canvas.width() as i32;
    let canvas_h = canvas.height() as i32;

    for ((row, col), &alpha) in section_mask.indexed_iter() {
        if alpha == mask::TRANSPARENT {
            continue;
        }
        let cx = ox + col as i32;
        let cy = oy + row as i32;
        if cx < 0 || cy < 0 || cx >= canvas_w || cy >= canvas_h {
            continue;
        }
        let pixel: Rgb = tile.get_pixel(col as u32, row as u32).0;
        canvas.put_pixel(cx as u32, cy as u32, image::Rgb(pixel));
    }
}
