//! Whiteboard application state.
//!
//! [`Whiteboard`] is the single value holding everything the UI can change:
//! surface layers, tool settings, the stroke in progress, the placement
//! workflow, placed annotations and variable bindings. Input arrives as
//! [`BoardAction`]s; observers learn about changes by draining
//! [`BoardEvent`]s.
//!
//! Recognition is split in two so the board is never borrowed across the
//! network call:
//!
//! ```ignore
//! let pending = board.begin_recognition()?;          // trigger disabled
//! let outcome = recognizer.recognize(&pending.request).await;
//! board.complete_recognition(pending.ticket, outcome); // may await placement
//! ```

use crate::config::BoardConfig;
use crate::input::{InputState, MouseButton, PointerEvent};
use crate::overlay::{Annotation, AnnotationId, EstimateTypesetter, OverlayManager, Typesetter};
use crate::placement::{Completion, PendingPlacement, PlacementMachine, RequestTicket};
use crate::recognition::{
    CalculateRequest, RecognitionError, RecognitionOutcome, RecognitionResult, Recognizer,
    VariableBindings,
};
use crate::stroke::StrokeEngine;
use crate::surface::Surface;
use crate::toolbar::ToolbarState;
use crate::tools::{SerializableColor, ToolKind, ToolSettings};
use kurbo::Point;

/// User input fed into the board.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    /// Pointer event in surface coordinates.
    Pointer(PointerEvent),
    /// The viewport changed size.
    Resize { width: u32, height: u32 },
    /// Clear ink and annotations.
    Reset,
    SelectTool(ToolKind),
    ToggleEraser,
    SetColor(SerializableColor),
    SetEraserWidth(u32),
    /// Drop the result waiting for placement.
    CancelPlacement,
    /// Forget all variable bindings.
    ClearBindings,
}

/// Change notifications for observers (renderers, toolbars).
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// Ink layer content changed.
    InkChanged,
    /// Both layers were re-initialized at a new size.
    SurfaceResized { width: u32, height: u32 },
    ToolChanged(ToolKind),
    RecognitionStarted(RequestTicket),
    /// A request failed; the board stays usable.
    RecognitionFailed { message: String },
    /// A result is waiting for a placement click.
    PlacementPending { expression: String, answer: String },
    PlacementCancelled,
    AnnotationPlaced(AnnotationId),
    /// An annotation's transient drag offset changed.
    AnnotationDragged(AnnotationId),
    /// A drag ended and the stored position changed.
    AnnotationMoved { id: AnnotationId, top: f64, left: f64 },
    AnnotationsCleared,
    BindingsChanged,
}

/// A recognition request that has been issued and not yet completed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub request: CalculateRequest,
}

/// The whiteboard state machine.
pub struct Whiteboard {
    config: BoardConfig,
    surface: Surface,
    tools: ToolSettings,
    strokes: StrokeEngine,
    input: InputState,
    placement: PlacementMachine,
    overlay: OverlayManager,
    bindings: VariableBindings,
    typesetter: Box<dyn Typesetter>,
    /// The primary press in progress started while a result was awaiting
    /// placement. Only such a press can place it.
    placement_press: bool,
    events: Vec<BoardEvent>,
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl Whiteboard {
    /// Create a board with initialized layers.
    pub fn new(config: BoardConfig) -> Self {
        let typesetter = EstimateTypesetter::new(config.annotation_font_size);
        Self::with_typesetter(config, Box::new(typesetter))
    }

    /// Create a board that measures annotations with `typesetter`.
    pub fn with_typesetter(config: BoardConfig, typesetter: Box<dyn Typesetter>) -> Self {
        let surface = Surface::new(config.width, config.height, config.background_color);
        let tools = ToolSettings::new(config.default_color, config.pen_width, config.eraser_width);
        Self {
            config,
            surface,
            tools,
            strokes: StrokeEngine::new(),
            input: InputState::new(),
            placement: PlacementMachine::new(),
            overlay: OverlayManager::new(),
            bindings: VariableBindings::new(),
            typesetter,
            placement_press: false,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    pub fn strokes(&self) -> &StrokeEngine {
        &self.strokes
    }

    pub fn placement(&self) -> &PlacementMachine {
        &self.placement
    }

    pub fn overlay(&self) -> &OverlayManager {
        &self.overlay
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.overlay.annotations()
    }

    pub fn bindings(&self) -> &VariableBindings {
        &self.bindings
    }

    /// Result waiting for a placement click.
    pub fn pending_placement(&self) -> Option<&PendingPlacement> {
        self.placement.pending()
    }

    /// Whether the calculate control is enabled.
    pub fn can_submit(&self) -> bool {
        self.placement.can_submit()
    }

    /// What the toolbar should show.
    pub fn toolbar(&self) -> ToolbarState {
        ToolbarState::from_board(&self.tools, &self.placement)
    }

    /// Take all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply one user action.
    pub fn apply(&mut self, action: BoardAction) {
        match action {
            BoardAction::Pointer(event) => self.handle_pointer_event(&event),
            BoardAction::Resize { width, height } => {
                self.strokes.end();
                self.surface.resize(width, height);
                let (width, height) = self.surface.dimensions();
                self.emit(BoardEvent::SurfaceResized { width, height });
            }
            BoardAction::Reset => self.reset(),
            BoardAction::SelectTool(tool) => {
                self.tools.set_tool(tool);
                self.emit(BoardEvent::ToolChanged(tool));
            }
            BoardAction::ToggleEraser => {
                let tool = self.tools.toggle_eraser();
                self.emit(BoardEvent::ToolChanged(tool));
            }
            BoardAction::SetColor(color) => self.tools.color = color,
            BoardAction::SetEraserWidth(width) => {
                self.tools.set_eraser_width(width);
            }
            BoardAction::CancelPlacement => {
                if self.placement.cancel() {
                    log::info!("Placement cancelled");
                    self.emit(BoardEvent::PlacementCancelled);
                }
            }
            BoardAction::ClearBindings => {
                if !self.bindings.is_empty() {
                    self.bindings.clear();
                    self.emit(BoardEvent::BindingsChanged);
                }
            }
        }
    }

    /// Clear ink and annotations. Background, tools, bindings and any
    /// pending result are kept.
    fn reset(&mut self) {
        self.strokes.end();
        self.surface.reset();
        self.overlay.clear_all();
        self.emit(BoardEvent::InkChanged);
        self.emit(BoardEvent::AnnotationsCleared);
    }

    fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.input.handle_pointer_event(event);
        match *event {
            PointerEvent::Down { position, button } => {
                if button != MouseButton::Left {
                    return;
                }
                self.placement_press = false;
                // Annotations sit above the ink and take the press first.
                if let Some(id) = self.overlay.hit_test(position) {
                    self.overlay.begin_drag(&id, position);
                    self.emit(BoardEvent::AnnotationDragged(id));
                    return;
                }
                if self.placement.is_awaiting() {
                    self.placement_press = true;
                    return;
                }
                self.strokes.begin(position, self.tools.resolve_style());
            }
            PointerEvent::Move { position } => {
                if let Some(id) = self.overlay.drag_to(position).cloned() {
                    self.emit(BoardEvent::AnnotationDragged(id));
                } else if self.strokes.extend(position, self.surface.ink_mut()) {
                    self.emit(BoardEvent::InkChanged);
                }
            }
            PointerEvent::Up { button, .. } => {
                if button != MouseButton::Left {
                    return;
                }
                if self.overlay.drag().is_some() {
                    self.finish_drag();
                    return;
                }
                self.strokes.end();
                // A stroke that outlived the request never places its result.
                let placement_press = std::mem::take(&mut self.placement_press);
                if let Some(click) = self.input.click().filter(|_| placement_press) {
                    self.handle_click(click);
                }
            }
            PointerEvent::Leave => {
                self.placement_press = false;
                self.strokes.end();
                if self.overlay.drag().is_some() {
                    self.finish_drag();
                }
            }
        }
    }

    fn finish_drag(&mut self) {
        if let Some((id, _)) = self.overlay.end_drag() {
            if let Some(annotation) = self.overlay.get(&id) {
                let (top, left) = (annotation.top, annotation.left);
                self.emit(BoardEvent::AnnotationMoved { id, top, left });
            }
        }
    }

    fn handle_click(&mut self, at: Point) {
        let Some(placed) = self.placement.place(at) else {
            return;
        };
        let annotation = Annotation::new(placed.display_text, placed.top, placed.left);
        let id = self.overlay.add(annotation, self.typesetter.as_ref());
        log::info!(
            "Placed '{} = {}' at top={} left={}",
            placed.result.expression,
            placed.result.answer,
            placed.top,
            placed.left
        );
        self.emit(BoardEvent::AnnotationPlaced(id));
    }

    /// Issue a recognition request for the current ink.
    ///
    /// Fails with [`RecognitionError::Busy`] while a request is in flight or
    /// a result is awaiting placement.
    pub fn begin_recognition(&mut self) -> Result<PendingRequest, RecognitionError> {
        let ticket = self.placement.begin_submission().inspect_err(|_| {
            log::debug!("Recognition suppressed: trigger disabled");
        })?;
        let request = match CalculateRequest::from_surface(
            &self.surface,
            self.config.snapshot_layers,
            &self.bindings,
        ) {
            Ok(request) => request,
            Err(e) => {
                self.placement.abandon_submission(ticket);
                log::error!("Failed to snapshot surface: {}", e);
                self.emit(BoardEvent::RecognitionFailed { message: e.to_string() });
                return Err(e);
            }
        };
        log::info!("Recognition request {} issued", ticket.id());
        self.emit(BoardEvent::RecognitionStarted(ticket));
        Ok(PendingRequest { ticket, request })
    }

    /// Apply the outcome of a request issued by [`Self::begin_recognition`].
    ///
    /// Returns `true` when a result is now awaiting placement.
    pub fn complete_recognition(&mut self, ticket: RequestTicket, outcome: RecognitionOutcome) -> bool {
        match self.placement.complete_submission(ticket, outcome) {
            Completion::Stale => false,
            Completion::Failed(e) => {
                log::warn!("Recognition request {} failed: {}", ticket.id(), e);
                self.emit(BoardEvent::RecognitionFailed { message: e.to_string() });
                false
            }
            Completion::Pending { result, assignments } => {
                self.apply_assignments(&assignments);
                log::info!("Result '{} = {}' awaiting placement", result.expression, result.answer);
                self.emit(BoardEvent::PlacementPending {
                    expression: result.expression,
                    answer: result.answer,
                });
                true
            }
        }
    }

    /// Run a full request against `recognizer`. The board is borrowed for
    /// the whole call; hosts that keep drawing meanwhile use
    /// [`Self::begin_recognition`] and [`Self::complete_recognition`].
    pub async fn calculate(&mut self, recognizer: &dyn Recognizer) -> bool {
        let Ok(pending) = self.begin_recognition() else {
            return false;
        };
        let outcome = recognizer.recognize(&pending.request).await;
        self.complete_recognition(pending.ticket, outcome)
    }

    fn apply_assignments(&mut self, assignments: &[RecognitionResult]) {
        if assignments.is_empty() {
            return;
        }
        for result in assignments {
            log::debug!("Binding {} = {}", result.expression, result.answer);
            self.bindings
                .insert(result.expression.clone(), result.value.clone());
        }
        self.emit(BoardEvent::BindingsChanged);
    }

    /// Queue an event, collapsing repeats of the same notification.
    fn emit(&mut self, event: BoardEvent) {
        if self.events.last() == Some(&event) {
            return;
        }
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::Z_DRAGGING;
    use crate::recognition::BoxFuture;
    use kurbo::Size;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSize;

    impl Typesetter for FixedSize {
        fn typeset(&self, _text: &str) -> Size {
            Size::new(40.0, 20.0)
        }
    }

    struct Canned {
        calls: AtomicUsize,
        reply: RecognitionOutcome,
    }

    impl Canned {
        fn new(reply: RecognitionOutcome) -> Self {
            Self { calls: AtomicUsize::new(0), reply }
        }
    }

    impl Recognizer for Canned {
        fn recognize<'a>(&'a self, _request: &'a CalculateRequest) -> BoxFuture<'a, RecognitionOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.reply.clone();
            Box::pin(async move { reply })
        }
    }

    fn board() -> Whiteboard {
        Whiteboard::with_typesetter(BoardConfig::default().with_size(200, 300), Box::new(FixedSize))
    }

    fn down(board: &mut Whiteboard, x: f64, y: f64) {
        board.apply(BoardAction::Pointer(PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }));
    }

    fn move_to(board: &mut Whiteboard, x: f64, y: f64) {
        board.apply(BoardAction::Pointer(PointerEvent::Move { position: Point::new(x, y) }));
    }

    fn up(board: &mut Whiteboard, x: f64, y: f64) {
        board.apply(BoardAction::Pointer(PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }));
    }

    fn click(board: &mut Whiteboard, x: f64, y: f64) {
        down(board, x, y);
        up(board, x, y);
    }

    fn stroke(board: &mut Whiteboard, from: (f64, f64), to: (f64, f64)) {
        down(board, from.0, from.1);
        move_to(board, to.0, to.1);
        up(board, to.0, to.1);
    }

    fn await_result(board: &mut Whiteboard, expression: &str, answer: &str) {
        let pending = board.begin_recognition().unwrap();
        assert!(board.complete_recognition(
            pending.ticket,
            Ok(vec![RecognitionResult::new(expression, answer)])
        ));
    }

    fn place(board: &mut Whiteboard, expression: &str, x: f64, y: f64) -> AnnotationId {
        await_result(board, expression, "1");
        click(board, x, y);
        board.annotations().last().unwrap().id.clone()
    }

    #[test]
    fn test_pen_stroke_draws_ink() {
        let mut board = board();
        stroke(&mut board, (10.5, 10.5), (60.5, 10.5));
        assert_eq!(board.surface().ink_pixel(30, 10), Some([255, 255, 255, 255]));
        assert!(!board.strokes().is_drawing());
        assert!(board.drain_events().contains(&BoardEvent::InkChanged));
    }

    #[test]
    fn test_style_change_mid_stroke_keeps_captured_style() {
        let mut board = board();
        let red = SerializableColor::rgb(255, 0, 0);
        let blue = SerializableColor::rgb(0, 0, 255);
        board.apply(BoardAction::SetColor(red));

        down(&mut board, 10.5, 10.5);
        move_to(&mut board, 50.5, 10.5);
        board.apply(BoardAction::SetColor(blue));
        board.apply(BoardAction::SetEraserWidth(50));
        move_to(&mut board, 90.5, 10.5);
        up(&mut board, 90.5, 10.5);

        // First half stays red, and so does the rest of the stroke.
        assert_eq!(board.surface().ink_pixel(30, 10), Some([255, 0, 0, 255]));
        assert_eq!(board.surface().ink_pixel(70, 10), Some([255, 0, 0, 255]));

        // The next stroke picks up the new color.
        stroke(&mut board, (10.5, 40.5), (50.5, 40.5));
        assert_eq!(board.surface().ink_pixel(30, 40), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_eraser_removes_without_revealing_background() {
        let mut board = board();
        stroke(&mut board, (10.5, 20.5), (80.5, 20.5));
        assert_eq!(board.surface().ink_pixel(40, 20), Some([255, 255, 255, 255]));

        board.apply(BoardAction::ToggleEraser);
        stroke(&mut board, (40.5, 5.5), (40.5, 35.5));

        assert_eq!(board.surface().ink_pixel(40, 20), Some([0, 0, 0, 0]));
        assert_eq!(board.surface().background_pixel(40, 20), Some([0, 0, 0, 255]));
        // Ink outside the eraser path survives.
        assert_eq!(board.surface().ink_pixel(75, 20), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut board = board();
        down(&mut board, 10.5, 10.5);
        board.apply(BoardAction::Pointer(PointerEvent::Leave));
        assert!(!board.strokes().is_drawing());

        // Re-entering without a press draws nothing.
        move_to(&mut board, 60.5, 60.5);
        assert_eq!(board.surface().ink_pixel(30, 30), Some([0, 0, 0, 0]));
        assert!(board.surface().ink_is_empty());
    }

    #[test]
    fn test_reset_clears_ink_and_annotations_but_not_background() {
        let mut board = board();
        stroke(&mut board, (10.5, 10.5), (60.5, 10.5));
        place(&mut board, "2+2", 100.0, 100.0);
        place(&mut board, "3+3", 100.0, 200.0);
        assert_eq!(board.annotations().len(), 2);

        board.apply(BoardAction::Reset);
        assert!(board.surface().ink_is_empty());
        assert!(board.annotations().is_empty());
        assert_eq!(board.surface().background_pixel(30, 10), Some([0, 0, 0, 255]));
        let events = board.drain_events();
        assert!(events.contains(&BoardEvent::AnnotationsCleared));
    }

    #[test]
    fn test_second_trigger_suppressed_while_in_flight() {
        let mut board = board();
        let first = board.begin_recognition().unwrap();
        assert!(!board.can_submit());
        assert_eq!(board.begin_recognition(), Err(RecognitionError::Busy));

        assert!(board.complete_recognition(first.ticket, Ok(vec![RecognitionResult::new("2+2", "4")])));
        assert_eq!(board.begin_recognition(), Err(RecognitionError::Busy));

        let pending_events = board
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, BoardEvent::PlacementPending { .. }))
            .count();
        assert_eq!(pending_events, 1);
    }

    #[test]
    fn test_calculate_issues_one_request() {
        let mut board = board();
        let recognizer = Canned::new(Ok(vec![RecognitionResult::new("2+2", "4")]));
        assert!(pollster::block_on(board.calculate(&recognizer)));
        assert!(!pollster::block_on(board.calculate(&recognizer)));
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drawing_continues_while_in_flight() {
        let mut board = board();
        let pending = board.begin_recognition().unwrap();
        stroke(&mut board, (10.5, 10.5), (60.5, 10.5));
        assert_eq!(board.surface().ink_pixel(30, 10), Some([255, 255, 255, 255]));
        board.complete_recognition(pending.ticket, Err(RecognitionError::Timeout));
        assert!(board.can_submit());
    }

    #[test]
    fn test_placement_click_creates_annotation() {
        let mut board = board();
        await_result(&mut board, "2+2", "4");
        board.drain_events();

        click(&mut board, 150.0, 200.0);

        assert_eq!(board.annotations().len(), 1);
        let annotation = board.annotations()[0].clone();
        assert!((annotation.top - 200.0).abs() < f64::EPSILON);
        assert!((annotation.left - 150.0).abs() < f64::EPSILON);
        assert_eq!(annotation.display_text, r"\(\LARGE{\text{2+2} = 4}\)");
        assert!(board.pending_placement().is_none());
        assert!(board.can_submit());
        // The placement press did not draw.
        assert!(board.surface().ink_is_empty());
        assert_eq!(
            board.drain_events(),
            vec![BoardEvent::AnnotationPlaced(annotation.id.clone())]
        );
    }

    #[test]
    fn test_press_while_awaiting_does_not_draw() {
        let mut board = board();
        await_result(&mut board, "2+2", "4");
        down(&mut board, 10.5, 10.5);
        move_to(&mut board, 60.5, 10.5);
        assert!(!board.strokes().is_drawing());
        assert!(board.surface().ink_is_empty());
    }

    #[test]
    fn test_cancel_discards_pending_result() {
        let mut board = board();
        await_result(&mut board, "2+2", "4");
        assert!(!board.can_submit());

        board.apply(BoardAction::CancelPlacement);
        assert!(board.pending_placement().is_none());
        assert!(board.can_submit());
        assert!(board.toolbar().calculate_enabled);

        click(&mut board, 150.0, 200.0);
        assert!(board.annotations().is_empty());
    }

    #[test]
    fn test_failure_is_absorbed() {
        let mut board = board();
        stroke(&mut board, (10.5, 10.5), (60.5, 10.5));
        let pending = board.begin_recognition().unwrap();
        board.drain_events();

        assert!(!board.complete_recognition(
            pending.ticket,
            Err(RecognitionError::Status { status: 500, body: String::new() })
        ));
        assert!(board.pending_placement().is_none());
        assert!(board.can_submit());
        assert!(!board.surface().ink_is_empty());
        assert!(matches!(
            board.drain_events().as_slice(),
            [BoardEvent::RecognitionFailed { .. }]
        ));
    }

    #[test]
    fn test_drag_moves_only_target() {
        let mut board = board();
        let a = place(&mut board, "a", 10.0, 10.0);
        let b = place(&mut board, "b", 100.0, 100.0);

        down(&mut board, 20.0, 20.0);
        assert_eq!(board.overlay().z_index(&a), Z_DRAGGING);
        move_to(&mut board, 25.0, 25.0);
        up(&mut board, 25.0, 25.0);

        let moved = board.overlay().get(&a).unwrap();
        assert!((moved.top - 15.0).abs() < f64::EPSILON);
        assert!((moved.left - 15.0).abs() < f64::EPSILON);
        let other = board.overlay().get(&b).unwrap();
        assert!((other.top - 100.0).abs() < f64::EPSILON);
        // Dragging never touches ink.
        assert!(board.surface().ink_is_empty());
    }

    #[test]
    fn test_press_on_annotation_while_awaiting_does_not_place() {
        let mut board = board();
        let a = place(&mut board, "a", 10.0, 10.0);
        await_result(&mut board, "b", "2");

        click(&mut board, 20.0, 20.0);
        assert_eq!(board.annotations().len(), 1);
        assert!(board.pending_placement().is_some());
        assert!(board.overlay().get(&a).is_some());
    }

    #[test]
    fn test_assignments_update_bindings() {
        let mut board = board();
        let pending = board.begin_recognition().unwrap();
        board.complete_recognition(
            pending.ticket,
            Ok(vec![RecognitionResult::new("x", "4").assigned()]),
        );
        assert_eq!(board.bindings().get("x"), Some(&Value::String("4".to_string())));
        board.apply(BoardAction::CancelPlacement);

        let next = board.begin_recognition().unwrap();
        assert_eq!(next.request.dict_of_vars.get("x"), Some(&Value::String("4".to_string())));

        board.apply(BoardAction::ClearBindings);
        assert!(board.bindings().is_empty());
    }

    #[test]
    fn test_numeric_assignment_sent_back_as_number() {
        let mut board = board();
        let pending = board.begin_recognition().unwrap();
        let outcome = crate::recognition::parse_response(
            &json!({"data": [{"expr": "x", "result": 4, "assign": true}]}).to_string(),
        );
        board.complete_recognition(pending.ticket, outcome);
        assert_eq!(board.bindings().get("x"), Some(&json!(4)));
        board.apply(BoardAction::CancelPlacement);

        let next = board.begin_recognition().unwrap();
        let body = serde_json::to_value(&next.request).unwrap();
        assert_eq!(body["dict_of_vars"]["x"], json!(4));
    }

    #[test]
    fn test_eraser_style_change_mid_stroke_keeps_captured_style() {
        let mut board = board();
        stroke(&mut board, (10.5, 50.5), (150.5, 50.5));
        board.apply(BoardAction::ToggleEraser);
        board.apply(BoardAction::SetEraserWidth(5));

        down(&mut board, 50.5, 40.5);
        move_to(&mut board, 50.5, 60.5);
        board.apply(BoardAction::SetEraserWidth(50));
        board.apply(BoardAction::ToggleEraser);
        move_to(&mut board, 50.5, 70.5);
        up(&mut board, 50.5, 70.5);

        assert_eq!(board.surface().ink_pixel(50, 50), Some([0, 0, 0, 0]));
        // Outside the 5px eraser but inside a 50px one: untouched.
        assert_eq!(board.surface().ink_pixel(70, 50), Some([255, 255, 255, 255]));
        // The last segment still erased rather than painting with the pen.
        assert_eq!(board.surface().ink_pixel(50, 66), Some([0, 0, 0, 0]));
        assert_eq!(board.tools().current_tool, ToolKind::Pen);
    }

    #[test]
    fn test_stroke_spanning_completion_does_not_place() {
        let mut board = board();
        let pending = board.begin_recognition().unwrap();
        down(&mut board, 10.5, 10.5);
        move_to(&mut board, 60.5, 10.5);
        board.complete_recognition(pending.ticket, Ok(vec![RecognitionResult::new("1+1", "2")]));
        up(&mut board, 60.5, 10.5);

        assert!(board.annotations().is_empty());
        assert!(board.pending_placement().is_some());
        assert_eq!(board.surface().ink_pixel(30, 10), Some([255, 255, 255, 255]));

        // The next click chooses the position.
        click(&mut board, 120.0, 80.0);
        assert_eq!(board.annotations().len(), 1);
        assert!((board.annotations()[0].top - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_reinitializes_layers() {
        let mut board = board();
        stroke(&mut board, (10.5, 10.5), (60.5, 10.5));
        board.apply(BoardAction::Resize { width: 400, height: 100 });
        assert_eq!(board.surface().dimensions(), (400, 100));
        assert!(board.surface().ink_is_empty());
        assert_eq!(board.surface().background_pixel(399, 99), Some([0, 0, 0, 255]));
    }
}
