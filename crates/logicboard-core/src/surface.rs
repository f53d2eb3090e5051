//! Dual-layer drawing surface.
//!
//! The surface owns two equally sized raster layers: an opaque background
//! filled with a solid color, and a transparent ink layer that accumulates
//! strokes. Reset clears ink only; resize re-initializes both.

use crate::raster::blend_source_over;
use crate::tools::SerializableColor;
use image::{Rgba, RgbaImage};
use kurbo::Size;
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Which layers a snapshot contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotLayers {
    /// Ink only, with transparent pixels where nothing was drawn.
    #[default]
    Ink,
    /// Background with ink composited on top.
    Composite,
}

/// An encoded copy of the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    /// PNG bytes.
    pub png: Vec<u8>,
}

impl Snapshot {
    /// Self-contained `data:` URI for the PNG.
    pub fn to_data_uri(&self) -> String {
        use base64::{Engine, engine::general_purpose::STANDARD};
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Background and ink layers of the same size.
#[derive(Debug, Clone)]
pub struct Surface {
    background: RgbaImage,
    ink: RgbaImage,
    fill: SerializableColor,
}

impl Surface {
    /// Allocate both layers at the given size.
    pub fn new(width: u32, height: u32, fill: SerializableColor) -> Self {
        let mut surface = Self {
            background: RgbaImage::new(1, 1),
            ink: RgbaImage::new(1, 1),
            fill,
        };
        surface.initialize(width, height);
        surface
    }

    /// Allocate both layers, fill the background and clear the ink.
    ///
    /// Zero dimensions are clamped to one pixel.
    pub fn initialize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        self.background = RgbaImage::from_pixel(width, height, Rgba(self.fill.to_array()));
        self.ink = RgbaImage::new(width, height);
        log::debug!("Surface initialized at {}x{}", width, height);
    }

    /// Track a viewport size change. Existing ink is discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.ink_is_empty() {
            log::warn!("Resize to {}x{} discards existing ink", width, height);
        }
        self.initialize(width, height);
    }

    /// Clear the ink layer. The background is untouched.
    pub fn reset(&mut self) {
        self.ink.pixels_mut().for_each(|px| px.0 = [0, 0, 0, 0]);
    }

    /// Surface size in pixels.
    pub fn size(&self) -> Size {
        let (w, h) = self.ink.dimensions();
        Size::new(f64::from(w), f64::from(h))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.ink.dimensions()
    }

    /// Background fill color.
    pub fn fill(&self) -> SerializableColor {
        self.fill
    }

    pub fn ink(&self) -> &RgbaImage {
        &self.ink
    }

    pub(crate) fn ink_mut(&mut self) -> &mut RgbaImage {
        &mut self.ink
    }

    pub fn background(&self) -> &RgbaImage {
        &self.background
    }

    /// Ink pixel, or `None` outside the surface.
    pub fn ink_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.ink.get_pixel_checked(x, y).map(|px| px.0)
    }

    /// Background pixel, or `None` outside the surface.
    pub fn background_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.background.get_pixel_checked(x, y).map(|px| px.0)
    }

    /// Whether every ink pixel is fully transparent.
    pub fn ink_is_empty(&self) -> bool {
        self.ink.pixels().all(|px| px.0[3] == 0)
    }

    /// Background with ink painted on top.
    pub fn composite(&self) -> RgbaImage {
        let mut out = self.background.clone();
        for (dst, src) in out.pixels_mut().zip(self.ink.pixels()) {
            if src.0[3] > 0 {
                blend_source_over(dst, src.0, 1.0);
            }
        }
        out
    }

    /// Encode the requested layers as PNG. Neither layer is modified.
    pub fn snapshot(&self, layers: SnapshotLayers) -> SurfaceResult<Snapshot> {
        let (width, height) = self.dimensions();
        let png = match layers {
            SnapshotLayers::Ink => encode_png(self.ink.as_raw(), width, height)?,
            SnapshotLayers::Composite => encode_png(self.composite().as_raw(), width, height)?,
        };
        Ok(Snapshot { width, height, png })
    }
}

/// Encode straight RGBA8 pixels as a PNG.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> SurfaceResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
    }
    Ok(png_data)
}
