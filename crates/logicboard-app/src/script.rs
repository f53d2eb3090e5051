//! Session scripts.
//!
//! A script is a JSON document replayed against a [`Whiteboard`]:
//!
//! ```json
//! {
//!   "width": 800,
//!   "height": 600,
//!   "steps": [
//!     { "op": "color", "color": "red" },
//!     { "op": "stroke", "points": [[10, 10], [80, 40]] },
//!     { "op": "calculate" },
//!     { "op": "click", "x": 150, "y": 200 }
//!   ]
//! }
//! ```
//!
//! [`Whiteboard`]: logicboard_core::Whiteboard

use kurbo::Point;
use logicboard_core::tools::{SWATCHES, parse_hex_color};
use logicboard_core::{BoardAction, MouseButton, PointerEvent, SerializableColor, ToolKind};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Io(String),
    #[error("Invalid script: {0}")]
    Parse(String),
    #[error("Unknown color '{0}' (expected a palette name or #rrggbb)")]
    UnknownColor(String),
    #[error("Stroke at step {0} has no points")]
    EmptyStroke(usize),
}

/// One scripted user interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Resize { width: u32, height: u32 },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Leave,
    /// Press at the first point, move through the rest, release at the last.
    Stroke { points: Vec<[f64; 2]> },
    /// Press and release at one point.
    Click { x: f64, y: f64 },
    /// Palette name or `#rrggbb`.
    Color { color: String },
    Tool { tool: ToolKind },
    ToggleEraser,
    EraserWidth { width: u32 },
    /// Send the ink to the recognition service and wait for the answer.
    Calculate,
    Cancel,
    Reset,
    ClearBindings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(json).map_err(|e| ScriptError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ScriptError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

/// Resolve a palette name or hex string.
pub fn resolve_color(color: &str) -> Option<SerializableColor> {
    SWATCHES
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(color))
        .map(|entry| entry.color())
        .or_else(|| parse_hex_color(color))
}

fn pointer(event: PointerEvent) -> BoardAction {
    BoardAction::Pointer(event)
}

fn down(x: f64, y: f64) -> BoardAction {
    pointer(PointerEvent::Down {
        position: Point::new(x, y),
        button: MouseButton::Left,
    })
}

fn up(x: f64, y: f64) -> BoardAction {
    pointer(PointerEvent::Up {
        position: Point::new(x, y),
        button: MouseButton::Left,
    })
}

fn move_to(x: f64, y: f64) -> BoardAction {
    pointer(PointerEvent::Move { position: Point::new(x, y) })
}

impl Step {
    /// Board actions for this step. `Calculate` maps to none; the runner
    /// handles it.
    pub fn actions(&self, index: usize) -> Result<Vec<BoardAction>, ScriptError> {
        let actions = match self {
            Step::Resize { width, height } => vec![BoardAction::Resize {
                width: *width,
                height: *height,
            }],
            Step::Down { x, y } => vec![down(*x, *y)],
            Step::Move { x, y } => vec![move_to(*x, *y)],
            Step::Up { x, y } => vec![up(*x, *y)],
            Step::Leave => vec![pointer(PointerEvent::Leave)],
            Step::Stroke { points } => {
                let (Some(first), Some(last)) = (points.first(), points.last()) else {
                    return Err(ScriptError::EmptyStroke(index));
                };
                let mut actions = vec![down(first[0], first[1])];
                actions.extend(points.iter().skip(1).map(|p| move_to(p[0], p[1])));
                actions.push(up(last[0], last[1]));
                actions
            }
            Step::Click { x, y } => vec![down(*x, *y), up(*x, *y)],
            Step::Color { color } => {
                let color = resolve_color(color).ok_or_else(|| ScriptError::UnknownColor(color.clone()))?;
                vec![BoardAction::SetColor(color)]
            }
            Step::Tool { tool } => vec![BoardAction::SelectTool(*tool)],
            Step::ToggleEraser => vec![BoardAction::ToggleEraser],
            Step::EraserWidth { width } => vec![BoardAction::SetEraserWidth(*width)],
            Step::Calculate => Vec::new(),
            Step::Cancel => vec![BoardAction::CancelPlacement],
            Step::Reset => vec![BoardAction::Reset],
            Step::ClearBindings => vec![BoardAction::ClearBindings],
        };
        Ok(actions)
    }
}
