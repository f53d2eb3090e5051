//! Discrete pen color palette offered by the toolbar.

use super::SerializableColor;

/// A named palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub hex: &'static str,
}

impl PaletteEntry {
    pub fn color(&self) -> SerializableColor {
        parse_hex_color(self.hex).unwrap_or_else(SerializableColor::white)
    }
}

/// Pen colors in toolbar order.
pub const SWATCHES: [PaletteEntry; 12] = [
    PaletteEntry { name: "black", hex: "#000000" },
    PaletteEntry { name: "white", hex: "#ffffff" },
    PaletteEntry { name: "red", hex: "#ee3333" },
    PaletteEntry { name: "pink", hex: "#e64980" },
    PaletteEntry { name: "purple", hex: "#be4bdb" },
    PaletteEntry { name: "brown", hex: "#893200" },
    PaletteEntry { name: "blue", hex: "#228be6" },
    PaletteEntry { name: "indigo", hex: "#3333ee" },
    PaletteEntry { name: "green", hex: "#40c057" },
    PaletteEntry { name: "dark-green", hex: "#00aa00" },
    PaletteEntry { name: "yellow", hex: "#fab005" },
    PaletteEntry { name: "orange", hex: "#fd7e14" },
];

/// Parse a `#rrggbb` color. Returns `None` for anything else.
pub fn parse_hex_color(color: &str) -> Option<SerializableColor> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(SerializableColor::rgb(r, g, b))
}
