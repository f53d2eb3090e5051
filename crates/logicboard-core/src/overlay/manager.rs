//! Overlay manager: owns placed annotations and drag gestures.

use super::annotation::{Annotation, AnnotationId};
use super::state::AnnotationState;
use super::typeset::Typesetter;
use kurbo::{Point, Size, Vec2};
use std::collections::HashMap;

/// An annotation following the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub id: AnnotationId,
    /// Pointer position when the drag started.
    pub origin: Point,
    /// Offset from the stored position, applied only on drag end.
    pub offset: Vec2,
}

/// Manages placed annotations.
///
/// The collection is insertion-ordered. Order carries no meaning; stacking
/// is decided by [`AnnotationState`].
#[derive(Debug, Clone, Default)]
pub struct OverlayManager {
    annotations: Vec<Annotation>,
    /// Measured size for each annotation.
    sizes: HashMap<AnnotationId, Size>,
    drag: Option<DragState>,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an annotation, measuring its text with `typesetter`.
    pub fn add(&mut self, annotation: Annotation, typesetter: &dyn Typesetter) -> AnnotationId {
        let id = annotation.id.clone();
        let size = typesetter.typeset(&annotation.display_text);
        self.sizes.insert(id.clone(), size);
        self.annotations.push(annotation);
        id
    }

    /// Annotations in insertion order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn get(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| &a.id == id)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Interaction state of an annotation.
    pub fn state(&self, id: &AnnotationId) -> AnnotationState {
        match &self.drag {
            Some(drag) if &drag.id == id => AnnotationState::Dragging,
            _ => AnnotationState::Resting,
        }
    }

    pub fn z_index(&self, id: &AnnotationId) -> i32 {
        self.state(id).z_index()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Where an annotation is drawn right now: stored position plus any
    /// in-progress drag offset, as `(top, left)`.
    pub fn rendered_position(&self, id: &AnnotationId) -> Option<(f64, f64)> {
        let annotation = self.get(id)?;
        let offset = match &self.drag {
            Some(drag) if &drag.id == id => drag.offset,
            _ => Vec2::ZERO,
        };
        Some((annotation.top + offset.y, annotation.left + offset.x))
    }

    /// Topmost annotation under `point`. Later annotations win ties.
    pub fn hit_test(&self, point: Point) -> Option<AnnotationId> {
        self.annotations
            .iter()
            .rev()
            .find(|a| {
                self.sizes
                    .get(&a.id)
                    .is_some_and(|size| a.bounds(*size).contains(point))
            })
            .map(|a| a.id.clone())
    }

    /// Start dragging `id` from pointer position `at`.
    pub fn begin_drag(&mut self, id: &AnnotationId, at: Point) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.drag = Some(DragState {
            id: id.clone(),
            origin: at,
            offset: Vec2::ZERO,
        });
        true
    }

    /// Follow the pointer during a drag.
    pub fn drag_to(&mut self, at: Point) -> Option<&AnnotationId> {
        let drag = self.drag.as_mut()?;
        drag.offset = at - drag.origin;
        Some(&drag.id)
    }

    /// Finish the drag and commit its offset. Returns the moved id and delta.
    pub fn end_drag(&mut self) -> Option<(AnnotationId, Vec2)> {
        let drag = self.drag.take()?;
        if self.on_drag_end(&drag.id, drag.offset.x, drag.offset.y) {
            Some((drag.id, drag.offset))
        } else {
            None
        }
    }

    /// Apply a drag delta to one annotation: `top += dy; left += dx`.
    ///
    /// Unknown ids are ignored and return `false`.
    pub fn on_drag_end(&mut self, id: &AnnotationId, dx: f64, dy: f64) -> bool {
        match self.annotations.iter_mut().find(|a| &a.id == id) {
            Some(annotation) => {
                annotation.translate(dx, dy);
                true
            }
            None => {
                log::debug!("Drag end for unknown annotation {}", id);
                false
            }
        }
    }

    /// Remove every annotation and any drag in progress.
    pub fn clear_all(&mut self) {
        self.annotations.clear();
        self.sizes.clear();
        self.drag = None;
    }
}
