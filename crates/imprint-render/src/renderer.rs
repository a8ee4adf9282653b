//! Renderer trait abstraction.

use imprint_core::state::{EditorSnapshot, InteractionState};
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
///
/// The renderer draws only from this context; the application assembles it
/// from its stores once per frame.
pub struct FrameContext<'a> {
    /// Immutable view of the document, objects and viewport.
    pub snapshot: &'a EditorSnapshot,
    /// In-flight gesture state.
    pub interaction: &'a InteractionState,
    /// Canvas size in logical pixels.
    pub canvas_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Fit scale applied under the user zoom, so zoom 1.0 shows the
    /// artboard at a comfortable size.
    pub view_scale: f64,
    /// Chrome color behind the workspace.
    pub chrome_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Whether to draw the rulers.
    pub show_rulers: bool,
    /// Content revision; the application bumps it on any document or
    /// object edit so the base-layer cache can notice.
    pub revision: u64,
}

impl<'a> FrameContext<'a> {
    /// Create a new frame context with default chrome.
    pub fn new(
        snapshot: &'a EditorSnapshot,
        interaction: &'a InteractionState,
        canvas_size: Size,
    ) -> Self {
        Self {
            snapshot,
            interaction,
            canvas_size,
            scale_factor: 1.0,
            view_scale: 0.25,
            chrome_color: Color::from_rgba8(38, 38, 38, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            show_rulers: true,
            revision: 0,
        }
    }

    /// Set the content revision.
    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the fit scale applied under the user zoom.
    pub fn with_view_scale(mut self, view_scale: f64) -> Self {
        self.view_scale = view_scale;
        self
    }

    /// Set the chrome color drawn behind the workspace.
    pub fn with_chrome(mut self, color: Color) -> Self {
        self.chrome_color = color;
        self
    }

    /// Set the selection highlight color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Toggle ruler display.
    pub fn with_rulers(mut self, show: bool) -> Self {
        self.show_rulers = show;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, wgpu directly, or other rendering engines.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &FrameContext);

    /// Get the color the surface is cleared to.
    fn clear_color(&self, ctx: &FrameContext) -> Color {
        ctx.chrome_color
    }
}
