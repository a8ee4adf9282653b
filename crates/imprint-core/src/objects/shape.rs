//! Shape object (rectangle / ellipse primitives).

use super::{ObjectCommon, SerializableColor};
use kurbo::{BezPath, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Geometric primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    /// Rectangle with the given corner radius in artboard pixels.
    RoundedRectangle {
        radius: f64,
    },
    Ellipse,
}

/// A filled/stroked primitive shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    pub kind: ShapeKind,
    pub fill: Option<SerializableColor>,
    pub stroke: Option<SerializableColor>,
    /// Stroke width in artboard pixels.
    pub stroke_width: f64,
}

impl ShapeObject {
    pub fn new(kind: ShapeKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            common: ObjectCommon::new(x, y, width, height),
            kind,
            fill: Some(SerializableColor::white()),
            stroke: Some(SerializableColor::black()),
            stroke_width: 1.0,
        }
    }

    /// Outline path in the object's local frame, where the object's box
    /// spans `local` (already converted to artboard pixels by the caller).
    pub fn to_path(&self, local: Rect) -> BezPath {
        match self.kind {
            ShapeKind::Rectangle => local.to_path(0.1),
            ShapeKind::RoundedRectangle { radius } => {
                let radius = radius.clamp(0.0, local.width().min(local.height()) / 2.0);
                kurbo::RoundedRect::from_rect(local, radius).to_path(0.1)
            }
            ShapeKind::Ellipse => kurbo::Ellipse::new(
                local.center(),
                (local.width() / 2.0, local.height() / 2.0),
                0.0,
            )
            .to_path(0.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_radius_clamped_to_half_extent() {
        let shape = ShapeObject::new(
            ShapeKind::RoundedRectangle { radius: 500.0 },
            0.0,
            0.0,
            1.0,
            1.0,
        );
        // Should not panic and should produce a closed path.
        let path = shape.to_path(Rect::new(0.0, 0.0, 40.0, 20.0));
        assert!(!path.elements().is_empty());
    }
}
