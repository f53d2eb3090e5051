//! Annotation overlay.
//!
//! Placed recognition results float above the ink layer as independently
//! draggable labels:
//! - Annotations are pure data (id, text, position)
//! - The manager owns the collection and the transient drag state
//! - A [`Typesetter`] measures text so drags can be hit-tested
//!
//! Nothing here touches raster content.

mod annotation;
mod manager;
mod state;
mod typeset;

pub use annotation::{Annotation, AnnotationId};
pub use manager::{DragState, OverlayManager};
pub use state::{AnnotationState, Z_DRAGGING, Z_RESTING};
pub use typeset::{EstimateTypesetter, Typesetter};
