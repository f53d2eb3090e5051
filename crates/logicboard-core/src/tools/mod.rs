//! Tool system for the whiteboard.

mod palette;

pub use palette::{PaletteEntry, SWATCHES, parse_hex_color};

use serde::{Deserialize, Serialize};

/// Width of pen strokes in pixels. Not user-adjustable.
pub const PEN_WIDTH: f64 = 3.0;
/// Smallest eraser diameter the toolbar slider offers.
pub const ERASER_WIDTH_MIN: u32 = 5;
/// Largest eraser diameter the toolbar slider offers.
pub const ERASER_WIDTH_MAX: u32 = 50;
/// Eraser diameter before the user touches the slider.
pub const DEFAULT_ERASER_WIDTH: u32 = 20;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
}

impl ToolKind {
    /// The other tool (what the toggle button switches to).
    pub fn toggled(self) -> Self {
        match self {
            ToolKind::Pen => ToolKind::Eraser,
            ToolKind::Eraser => ToolKind::Pen,
        }
    }
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Channels in image-buffer order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Style a stroke is rasterized with. Resolved once when the stroke starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub tool: ToolKind,
    pub color: SerializableColor,
    /// Line diameter in pixels.
    pub width: f64,
}

impl StrokeStyle {
    pub fn is_eraser(&self) -> bool {
        self.tool == ToolKind::Eraser
    }
}

/// Toolbar-controlled parameters that feed new strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Pen color for new strokes.
    pub color: SerializableColor,
    eraser_width: u32,
    pen_width: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            color: SerializableColor::white(),
            eraser_width: DEFAULT_ERASER_WIDTH,
            pen_width: PEN_WIDTH,
        }
    }
}

impl ToolSettings {
    /// Create settings with the given pen parameters.
    pub fn new(color: SerializableColor, pen_width: f64, eraser_width: u32) -> Self {
        let mut settings = Self {
            current_tool: ToolKind::Pen,
            color,
            eraser_width: DEFAULT_ERASER_WIDTH,
            pen_width,
        };
        settings.set_eraser_width(eraser_width);
        settings
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    /// Switch between pen and eraser.
    pub fn toggle_eraser(&mut self) -> ToolKind {
        self.current_tool = self.current_tool.toggled();
        self.current_tool
    }

    /// Set the eraser diameter, clamped to the slider range.
    pub fn set_eraser_width(&mut self, width: u32) -> u32 {
        let clamped = width.clamp(ERASER_WIDTH_MIN, ERASER_WIDTH_MAX);
        if clamped != width {
            log::debug!("Eraser width {} clamped to {}", width, clamped);
        }
        self.eraser_width = clamped;
        clamped
    }

    pub fn eraser_width(&self) -> u32 {
        self.eraser_width
    }

    pub fn pen_width(&self) -> f64 {
        self.pen_width
    }

    /// Style for a stroke starting now.
    pub fn resolve_style(&self) -> StrokeStyle {
        match self.current_tool {
            ToolKind::Pen => StrokeStyle {
                tool: ToolKind::Pen,
                color: self.color,
                width: self.pen_width,
            },
            ToolKind::Eraser => StrokeStyle {
                tool: ToolKind::Eraser,
                color: SerializableColor::black(),
                width: f64::from(self.eraser_width),
            },
        }
    }
}
