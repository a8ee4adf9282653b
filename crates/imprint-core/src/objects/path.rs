//! Path object (arbitrary vector outline).

use super::{ObjectCommon, SerializableColor};
use crate::path_sample::{parse_path, PathSampleError};
use kurbo::BezPath;
use serde::{Deserialize, Serialize};

/// An arbitrary vector path, stored as SVG path data in the object's
/// local coordinate space (artboard pixels relative to the object origin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    pub path_data: String,
    pub fill: Option<SerializableColor>,
    pub stroke: Option<SerializableColor>,
    /// Stroke width in artboard pixels.
    pub stroke_width: f64,
    /// Close the outline before filling.
    pub closed: bool,
}

impl PathObject {
    pub fn new(path_data: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            common: ObjectCommon::new(x, y, width, height),
            path_data: path_data.into(),
            fill: None,
            stroke: Some(SerializableColor::black()),
            stroke_width: 1.0,
            closed: false,
        }
    }

    /// Parse the stored path data.
    pub fn to_path(&self) -> Result<BezPath, PathSampleError> {
        let mut path = parse_path(&self.path_data)?;
        if self.closed {
            path.close_path();
        }
        Ok(path)
    }
}
