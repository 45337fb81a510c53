//! Per-tile painting
//!
//! Renders one section raster from the source photograph in either of two
//! styles behind a single configuration switch. Both styles lay down a base
//! fill, then texture it with thousands of small dots whose colors come
//! from sampling the source at positions pushed outward from the section
//! center, which exaggerates color divergence near the edges and produces
//! the 3D separation between neighboring tiles.

use crate::color::Rgb;
use crate::color::{gradient, quantize, sampler};
use crate::io::configuration::{
    DOT_RADIUS_DIVISOR, GRADIENT_DOT_COUNT, STIPPLE_DOT_COUNT, STIPPLE_PALETTE_SIZE,
    STIPPLE_SAMPLE_COUNT,
};
use image::RgbImage;
use rand::Rng;

/// Which painting style fills each section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileStyle {
    /// Quantized 12-color palette fill plus near-ish matched dots
    Stipple,
    /// Vertical two-color gradient fill plus sampled dots
    Gradient,
}

/// Sampling and style configuration shared by every tile in a render
#[derive(Debug, Clone)]
pub struct TileConfig {
    /// Painting style for every section
    pub style: TileStyle,
    /// Random color samples drawn per tile before quantization
    pub sample_count: usize,
    /// Dots painted per tile
    pub dot_count: usize,
    /// Target palette size for stipple quantization
    pub palette_size: usize,
    /// Optional fixed palette the gradient style snaps to
    pub fixed_palette: Option<Vec<Rgb>>,
}

impl TileConfig {
    /// Default configuration for the given style
    pub const fn for_style(style: TileStyle) -> Self {
        let dot_count = match style {
            TileStyle::Stipple => STIPPLE_DOT_COUNT,
            TileStyle::Gradient => GRADIENT_DOT_COUNT,
        };
        Self {
            style,
            sample_count: STIPPLE_SAMPLE_COUNT,
            dot_count,
            palette_size: STIPPLE_PALETTE_SIZE,
            fixed_palette: None,
        }
    }
}

/// Paints individual section rasters from a fixed source image
///
/// The section size is constant across a render, so the painter holds it
/// alongside the source and config; only the origin varies per tile.
pub struct TilePainter<'a> {
    source: &'a RgbImage,
    section_w: u32,
    section_h: u32,
    config: TileConfig,
}

impl<'a> TilePainter<'a> {
    /// Create a painter for sections of the given size
    pub fn new(source: &'a RgbImage, section_w: u32, section_h: u32, config: TileConfig) -> Self {
        Self {
            source,
            section_w,
            section_h,
            config,
        }
    }

    /// Render one section whose top-left corner sits at `origin` in canvas
    /// coordinates
    ///
    /// The origin feeds source sampling so each tile reflects its true
    /// position, including tiles that hang off the canvas.
    pub fn paint<R: Rng>(&self, origin: (i32, i32), rng: &mut R) -> RgbImage {
        match self.config.style {
            TileStyle::Stipple => self.paint_stipple(origin, rng),
            TileStyle::Gradient => self.paint_gradient(origin, rng),
        }
    }

    /// Stipple style: quantized background fill plus near-ish matched dots
    fn paint_stipple<R: Rng>(&self, origin: (i32, i32), rng: &mut R) -> RgbImage {
        let (ox, oy) = origin;
        let w = self.section_w as i32;
        let h = self.section_h as i32;

        // Sample a region roughly double the section size, centered on it
        let mut samples = Vec::with_capacity(self.config.sample_count);
        for _ in 0..self.config.sample_count {
            let x = rng.random_range(0..=w * 2) - w / 2;
            let y = rng.random_range(0..=h * 2) - h / 2;
            samples.push(sampler::sample(self.source, ox + x, oy + y));
        }

        let palette = quantize::quantize(&samples, self.config.palette_size);
        let background = palette.first().copied().unwrap_or([0, 0, 0]);
        let mut tile =
            RgbImage::from_pixel(self.section_w, self.section_h, image::Rgb(background));

        let radius = w / DOT_RADIUS_DIVISOR;
        for _ in 0..self.config.dot_count {
            let x = rng.random_range(0..w);
            let y = rng.random_range(0..h);

            // Sample further outside the section the further the dot sits
            // from the section center
            let dx = (x - w / 2) / 2;
            let dy = (y - h / 2) / 2;
            let sampled = sampler::sample(self.source, ox + x + dx, oy + y + dy);
            let color = quantize::nearish(sampled, &palette, rng);
            draw_dot(&mut tile, x, y, radius, color);
        }

        tile
    }

    /// Gradient style: vertical two-color ramp plus sampled dots
    fn paint_gradient<R: Rng>(&self, origin: (i32, i32), rng: &mut R) -> RgbImage {
        let (ox, oy) = origin;
        let w = self.section_w as i32;
        let h = self.section_h as i32;

        let top = sampler::sample(self.source, ox + w / 2, oy);
        let bottom = sampler::sample(self.source, ox + w / 2, oy + h);
        let (start, finish) = match &self.config.fixed_palette {
            Some(palette) => (
                quantize::nearest(top, palette),
                quantize::nearest(bottom, palette),
            ),
            None => (top, bottom),
        };

        let ramp = gradient::linear(start, finish, self.section_h as usize);
        let mut tile = RgbImage::new(self.section_w, self.section_h);
        for (y, color) in ramp.iter().enumerate() {
            for x in 0..self.section_w {
                tile.put_pixel(x, y as u32, image::Rgb(*color));
            }
        }

        let radius = w / DOT_RADIUS_DIVISOR;
        for _ in 0..self.config.dot_count {
            let x = rng.random_range(0..w);
            let y = rng.random_range(0..h);

            // Full-distance offset here, not half: the gradient style leans
            // harder on edge divergence to separate tiles
            let dx = x - w / 2;
            let dy = y - h / 2;
            let sampled = sampler::sample(self.source, ox + x + dx, oy + y + dy);
            let color = match &self.config.fixed_palette {
                Some(palette) => quantize::nearest(sampled, palette),
                None => sampled,
            };
            draw_dot(&mut tile, x, y, radius, color);
        }

        tile
    }
}

/// Paint a filled circle clipped to the tile raster
///
/// A zero radius still paints the center pixel, matching small sections
/// where `w / 34` truncates to nothing.
fn draw_dot(tile: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Rgb) {
    let w = tile.width() as i32;
    let h = tile.height() as i32;
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= radius * radius {
                tile.put_pixel(x as u32, y as u32, image::Rgb(color));
            }
        }
    }
}
