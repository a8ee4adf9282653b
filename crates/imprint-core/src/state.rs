//! Editor state consumed by the renderer.
//!
//! The renderer never reaches into application stores; each frame it is
//! handed an [`EditorSnapshot`] plus an [`InteractionState`] describing
//! in-flight gestures, and draws from those alone.

use crate::document::{Artboard, Document};
use crate::handles::HandleId;
use crate::objects::{DesignObject, ObjectId};
use crate::viewport::Viewport;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Background fill style for the canvas workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Transparent,
    Solid,
    Grid,
    Dots,
    Checkerboard,
}

/// Canvas background configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    pub kind: BackgroundKind,
    /// Hex color string; invalid values fall back to neutral gray.
    pub color: String,
    /// Pattern opacity, 0-1.
    pub opacity: f64,
    /// Grid/dot/checker spacing in screen pixels.
    pub grid_size: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Transparent,
            color: "#e5e5e5".to_string(),
            opacity: 1.0,
            grid_size: 20.0,
        }
    }
}

/// Tool currently active in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Text,
    Shape,
    Pan,
}

/// Whether a text object is being edited inline.
///
/// The renderer only ever sees one of two states: nothing is being
/// edited, or exactly one object is. Entering editing for another object
/// implicitly leaves the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditingState {
    #[default]
    Idle,
    Editing(ObjectId),
}

impl EditingState {
    pub fn is_editing(&self, id: ObjectId) -> bool {
        matches!(self, EditingState::Editing(edited) if *edited == id)
    }

    /// Enter editing for `id`, replacing any previous editing target.
    pub fn enter(&mut self, id: ObjectId) {
        *self = EditingState::Editing(id);
    }

    /// Return to idle.
    pub fn leave(&mut self) {
        *self = EditingState::Idle;
    }
}

/// Everything the renderer needs to draw one frame of document content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub document: Document,
    pub artboard: Artboard,
    pub viewport: Viewport,
    pub background: BackgroundConfig,
    /// Objects in insertion order; draw order is derived from z-index.
    pub objects: Vec<DesignObject>,
    pub selected_ids: Vec<ObjectId>,
    pub editing: EditingState,
}

impl EditorSnapshot {
    pub fn new(document: Document) -> Self {
        let artboard = document.artboard();
        Self {
            document,
            artboard,
            viewport: Viewport::default(),
            background: BackgroundConfig::default(),
            objects: Vec::new(),
            selected_ids: Vec::new(),
            editing: EditingState::Idle,
        }
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected_ids.contains(&id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&DesignObject> {
        self.objects.iter().find(|o| o.id() == id)
    }
}

/// Preview rectangle shown while dragging out a new text box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextDragPreview {
    pub start: Point,
    pub current: Point,
}

impl TextDragPreview {
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }
}

/// Transient gesture state for the current frame.
///
/// Any active gesture (`is_transforming`, `is_dragging_object`,
/// `is_dragging_artboard`, `is_panning`) bypasses the cached base layer
/// so feedback stays live.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    pub active_tool: Tool,
    /// A resize/rotate gesture is in progress on this handle.
    pub is_transforming: bool,
    pub transform_handle: Option<HandleId>,
    /// Rotation angle readout shown during a rotate gesture, in degrees.
    pub current_rotation: Option<f64>,
    pub is_dragging_object: bool,
    pub is_dragging_artboard: bool,
    pub is_panning: bool,
    pub hovered_handle: Option<HandleId>,
    /// Cursor position in screen pixels, if over the canvas.
    pub cursor: Option<Point>,
    /// Marquee selection rectangle in screen pixels.
    pub marquee: Option<Rect>,
    pub text_drag: Option<TextDragPreview>,
}

impl InteractionState {
    /// True while any gesture that must see live feedback is active.
    pub fn gesture_active(&self) -> bool {
        self.is_transforming
            || self.is_dragging_object
            || self.is_dragging_artboard
            || self.is_panning
    }

    /// Marquee is suppressed while the artboard itself is being dragged.
    pub fn visible_marquee(&self) -> Option<Rect> {
        if self.is_dragging_artboard {
            None
        } else {
            self.marquee
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::TextObject;
    use uuid::Uuid;

    #[test]
    fn test_editing_state_transitions() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut state = EditingState::default();
        assert_eq!(state, EditingState::Idle);

        state.enter(a);
        assert!(state.is_editing(a));
        assert!(!state.is_editing(b));

        // Entering another object replaces the target.
        state.enter(b);
        assert!(state.is_editing(b));
        assert!(!state.is_editing(a));

        state.leave();
        assert_eq!(state, EditingState::Idle);
    }

    #[test]
    fn test_marquee_suppressed_during_artboard_drag() {
        let mut interaction = InteractionState {
            marquee: Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
            ..Default::default()
        };
        assert!(interaction.visible_marquee().is_some());
        interaction.is_dragging_artboard = true;
        assert!(interaction.visible_marquee().is_none());
    }

    #[test]
    fn test_gesture_active_flags() {
        let mut interaction = InteractionState::default();
        assert!(!interaction.gesture_active());
        interaction.is_panning = true;
        assert!(interaction.gesture_active());
    }

    #[test]
    fn test_snapshot_lookup() {
        let mut snapshot = EditorSnapshot::new(Document::default());
        let text = TextObject::new("hi", 0.0, 0.0, 1.0, 1.0);
        let id = text.common.id;
        snapshot.objects.push(DesignObject::Text(text));
        snapshot.selected_ids.push(id);

        assert!(snapshot.is_selected(id));
        assert!(snapshot.object(id).is_some());
        assert!(snapshot.object(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_text_drag_preview_normalizes_rect() {
        let preview = TextDragPreview {
            start: Point::new(50.0, 40.0),
            current: Point::new(10.0, 20.0),
        };
        let rect = preview.rect();
        assert_eq!(rect, Rect::new(10.0, 20.0, 50.0, 40.0));
    }
}
