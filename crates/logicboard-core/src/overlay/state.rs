//! Annotation interaction state.

/// Stacking order of annotations at rest. Both values sit above the
/// surface layers.
pub const Z_RESTING: i32 = 30;
/// Stacking order of the annotation being dragged.
pub const Z_DRAGGING: i32 = 40;

/// The UI state of an annotation. Transient, never stored with the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationState {
    /// Sitting at its stored position.
    #[default]
    Resting,
    /// Following the pointer; rendered above everything else.
    Dragging,
}

impl AnnotationState {
    /// Stacking order for this state.
    pub fn z_index(self) -> i32 {
        match self {
            Self::Resting => Z_RESTING,
            Self::Dragging => Z_DRAGGING,
        }
    }
}
