//! Toolbar view model.

use crate::placement::PlacementMachine;
use crate::tools::{SerializableColor, ToolKind, ToolSettings};

/// Hint shown while a result is waiting to be placed.
pub const PLACEMENT_HINT: &str = "Click anywhere on the canvas to place the result";

/// Everything the toolbar needs to draw itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarState {
    pub tool: ToolKind,
    pub color: SerializableColor,
    /// Label of the pen/eraser toggle. Names the tool it switches *to*.
    pub toggle_label: &'static str,
    /// The width slider only shows in eraser mode.
    pub eraser_slider_visible: bool,
    pub eraser_width: u32,
    pub calculate_enabled: bool,
    pub calculate_label: &'static str,
    pub cancel_visible: bool,
    pub hint: Option<&'static str>,
}

impl ToolbarState {
    pub fn from_board(tools: &ToolSettings, placement: &PlacementMachine) -> Self {
        let awaiting = placement.is_awaiting();
        let tool = tools.current_tool;
        Self {
            tool,
            color: tools.color,
            toggle_label: match tool {
                ToolKind::Pen => "Use Eraser",
                ToolKind::Eraser => "Use Pen",
            },
            eraser_slider_visible: tool == ToolKind::Eraser,
            eraser_width: tools.eraser_width(),
            calculate_enabled: placement.can_submit(),
            calculate_label: if awaiting { "Click to Place Result" } else { "Calculate" },
            cancel_visible: awaiting,
            hint: awaiting.then_some(PLACEMENT_HINT),
        }
    }
}
