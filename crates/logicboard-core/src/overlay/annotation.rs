//! Placed annotation data.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique annotation identifier. Generated at placement, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(String);

impl AnnotationId {
    /// Fresh identifier.
    pub fn generate() -> Self {
        Self(format!("annotation-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnotationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A result label placed on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: AnnotationId,
    /// Typeset source shown to the user.
    pub display_text: String,
    /// Distance from the top of the surface.
    pub top: f64,
    /// Distance from the left of the surface.
    pub left: f64,
}

impl Annotation {
    pub fn new(display_text: impl Into<String>, top: f64, left: f64) -> Self {
        Self {
            id: AnnotationId::generate(),
            display_text: display_text.into(),
            top,
            left,
        }
    }

    /// Top-left corner as a point (`x = left`, `y = top`).
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Bounds for a measured size.
    pub fn bounds(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin(), size)
    }

    /// Shift by a drag delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.top += dy;
        self.left += dx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Annotation::new("a", 0.0, 0.0);
        let b = Annotation::new("a", 0.0, 0.0);
        assert_ne!(a.id, b.id);
        assert!(a.id.as_str().starts_with("annotation-"));
    }

    #[test]
    fn test_translate() {
        let mut a = Annotation::new("a", 10.0, 20.0);
        a.translate(5.0, -3.0);
        assert!((a.top - 7.0).abs() < f64::EPSILON);
        assert!((a.left - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serializes_camel_case() {
        let a = Annotation::new("x", 1.0, 2.0);
        let value = serde_json::to_value(&a).unwrap();
        assert_eq!(value["displayText"], "x");
        assert_eq!(value["top"], 1.0);
        assert!(value["id"].is_string());
    }
}
