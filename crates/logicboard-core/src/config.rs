//! Board configuration.

use crate::surface::SnapshotLayers;
use crate::tools::{DEFAULT_ERASER_WIDTH, PEN_WIDTH, SerializableColor};

/// Parameters that shape a new [`Whiteboard`](crate::Whiteboard).
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Initial surface width in pixels.
    pub width: u32,
    /// Initial surface height in pixels.
    pub height: u32,
    /// Solid fill of the background layer.
    pub background_color: SerializableColor,
    /// Pen color before the user picks one.
    pub default_color: SerializableColor,
    /// Pen diameter in pixels.
    pub pen_width: f64,
    /// Eraser diameter before the user moves the slider.
    pub eraser_width: u32,
    /// Which layers go into a recognition snapshot.
    pub snapshot_layers: SnapshotLayers,
    /// Font size used to estimate annotation bounds.
    pub annotation_font_size: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            background_color: SerializableColor::black(),
            default_color: SerializableColor::white(),
            pen_width: PEN_WIDTH,
            eraser_width: DEFAULT_ERASER_WIDTH,
            snapshot_layers: SnapshotLayers::Ink,
            annotation_font_size: 28.0,
        }
    }
}

impl BoardConfig {
    /// Same defaults with a different initial size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Send background and ink merged instead of ink only.
    pub fn with_snapshot_layers(mut self, layers: SnapshotLayers) -> Self {
        self.snapshot_layers = layers;
        self
    }
}
