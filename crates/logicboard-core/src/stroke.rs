//! Stroke engine: turns pointer gestures into rasterized ink.

use crate::raster::rasterize_segment;
use crate::tools::StrokeStyle;
use image::RgbaImage;
use kurbo::Point;

/// Ephemeral per-stroke pointer state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSession {
    /// Where the last segment ended.
    pub last_point: Point,
    /// Style captured when the stroke began.
    pub style: StrokeStyle,
    /// Segments rasterized so far.
    pub segments: usize,
}

/// State of the stroke engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Drawing(PointerSession),
}

/// Rasterizes pen and eraser strokes into an ink buffer.
#[derive(Debug, Clone, Default)]
pub struct StrokeEngine {
    state: StrokeState,
}

impl StrokeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StrokeState {
        &self.state
    }

    /// Check if a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing(_))
    }

    /// Style of the stroke in progress.
    pub fn active_style(&self) -> Option<StrokeStyle> {
        match self.state {
            StrokeState::Drawing(session) => Some(session.style),
            StrokeState::Idle => None,
        }
    }

    /// Start a stroke at `point` with a style that holds until it ends.
    ///
    /// A stroke still open from a missed release is closed first.
    pub fn begin(&mut self, point: Point, style: StrokeStyle) {
        if self.is_drawing() {
            log::debug!("Stroke restarted without release");
        }
        self.state = StrokeState::Drawing(PointerSession {
            last_point: point,
            style,
            segments: 0,
        });
    }

    /// Extend the stroke to `point`, rasterizing the new segment immediately.
    ///
    /// Returns `false` when no stroke is active.
    pub fn extend(&mut self, point: Point, ink: &mut RgbaImage) -> bool {
        let StrokeState::Drawing(session) = &mut self.state else {
            return false;
        };
        rasterize_segment(ink, session.last_point, point, &session.style);
        session.last_point = point;
        session.segments += 1;
        true
    }

    /// Finish the stroke. Returns the number of segments drawn.
    pub fn end(&mut self) -> Option<usize> {
        match std::mem::take(&mut self.state) {
            StrokeState::Drawing(session) => Some(session.segments),
            StrokeState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{SerializableColor, ToolKind};

    fn pen(color: SerializableColor) -> StrokeStyle {
        StrokeStyle { tool: ToolKind::Pen, color, width: 3.0 }
    }

    #[test]
    fn test_begin_extend_end() {
        let mut engine = StrokeEngine::new();
        let mut ink = RgbaImage::new(50, 50);
        assert!(!engine.is_drawing());

        engine.begin(Point::new(5.5, 5.5), pen(SerializableColor::white()));
        assert!(engine.is_drawing());
        assert!(engine.extend(Point::new(20.5, 5.5), &mut ink));
        assert!(engine.extend(Point::new(20.5, 30.5), &mut ink));
        assert_eq!(engine.end(), Some(2));
        assert!(!engine.is_drawing());

        assert_eq!(ink.get_pixel(12, 5).0, [255, 255, 255, 255]);
        assert_eq!(ink.get_pixel(20, 18).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_extend_when_idle_draws_nothing() {
        let mut engine = StrokeEngine::new();
        let mut ink = RgbaImage::new(10, 10);
        assert!(!engine.extend(Point::new(5.0, 5.0), &mut ink));
        assert!(ink.pixels().all(|px| px.0[3] == 0));
        assert_eq!(engine.end(), None);
    }

    #[test]
    fn test_press_without_move_leaves_no_ink() {
        let mut engine = StrokeEngine::new();
        let ink = RgbaImage::new(10, 10);
        engine.begin(Point::new(5.0, 5.0), pen(SerializableColor::white()));
        assert_eq!(engine.end(), Some(0));
        assert!(ink.pixels().all(|px| px.0[3] == 0));
    }

    #[test]
    fn test_style_is_held_for_the_stroke() {
        let mut engine = StrokeEngine::new();
        let red = pen(SerializableColor::rgb(255, 0, 0));
        engine.begin(Point::ZERO, red);
        assert_eq!(engine.active_style(), Some(red));
    }
}
