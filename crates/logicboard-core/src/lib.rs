//! LogicBoard Core Library
//!
//! Platform-agnostic state and logic for the LogicBoard whiteboard: the
//! two-layer drawing surface, stroke engine, recognition protocol, result
//! placement and the annotation overlay.

pub mod board;
pub mod config;
pub mod input;
pub mod overlay;
pub mod placement;
pub mod raster;
pub mod recognition;
pub mod stroke;
pub mod surface;
pub mod toolbar;
pub mod tools;

pub use board::{BoardAction, BoardEvent, PendingRequest, Whiteboard};
pub use config::BoardConfig;
pub use input::{InputState, MouseButton, PointerEvent};
pub use overlay::{Annotation, AnnotationId, EstimateTypesetter, OverlayManager, Typesetter};
pub use placement::{PlacementMachine, PlacementState, RequestTicket};
pub use recognition::{
    CALCULATE_PATH, CalculateRequest, RecognitionError, RecognitionOutcome, RecognitionResult,
    Recognizer, VariableBindings,
};
pub use stroke::StrokeEngine;
pub use surface::{Snapshot, SnapshotLayers, Surface, SurfaceError};
pub use toolbar::ToolbarState;
pub use tools::{SerializableColor, ToolKind, ToolSettings};
