//! Typesetting seam for annotation text.

use kurbo::Size;

/// Renders annotation text and reports its on-screen size.
///
/// Called whenever an annotation's text is set. The size is only used to
/// decide which annotation a pointer press lands on.
pub trait Typesetter: Send + Sync {
    fn typeset(&self, text: &str) -> Size;
}

/// Size estimate from character count, for hosts without a real renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateTypesetter {
    pub font_size: f64,
    /// Padding around the text on every side.
    pub padding: f64,
}

impl Default for EstimateTypesetter {
    fn default() -> Self {
        Self::new(28.0)
    }
}

impl EstimateTypesetter {
    pub fn new(font_size: f64) -> Self {
        Self { font_size, padding: 8.0 }
    }
}

impl Typesetter for EstimateTypesetter {
    fn typeset(&self, text: &str) -> Size {
        let visible = visible_text(text);
        let chars = visible.chars().count().max(1);
        // Average glyph is about 0.6 em wide.
        let width = chars as f64 * self.font_size * 0.6 + self.padding * 2.0;
        let height = self.font_size * 1.2 + self.padding * 2.0;
        Size::new(width, height)
    }
}

/// Strip TeX delimiters and commands, keeping what ends up on screen.
fn visible_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                // Skip a command name or a single escaped delimiter.
                if chars.peek().is_some_and(|n| n.is_ascii_alphabetic()) {
                    while chars.peek().is_some_and(|n| n.is_ascii_alphabetic()) {
                        chars.next();
                    }
                } else {
                    chars.next();
                }
            }
            '{' | '}' => {}
            _ => out.push(c),
        }
    }
    out
}
