//! Imprint Core Library
//!
//! Platform-agnostic data model, coordinate math, and layout logic for the
//! Imprint print-design canvas.

pub mod document;
pub mod handles;
pub mod objects;
pub mod path_sample;
pub mod state;
pub mod text_layout;
pub mod viewport;

pub use document::{Artboard, Document, Unit, BLEED_INCHES, RULER_SIZE, WORKSPACE_SIZE};
pub use handles::{HandleId, HandleMetrics};
pub use objects::{
    BlendMode, DesignObject, DropShadow, LayerEffects, ObjectCommon, ObjectId, OuterGlow,
    PathObject, SerializableColor, ShapeKind, ShapeObject, TextObject,
};
pub use path_sample::{sample_path, PathSample, PathSampleError};
pub use state::{
    BackgroundConfig, BackgroundKind, EditingState, EditorSnapshot, InteractionState, Tool,
};
pub use text_layout::TextMeasure;
pub use viewport::{CanvasTransform, Viewport};
