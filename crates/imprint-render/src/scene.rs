//! Vello scene assembly for one frame.
//!
//! A frame is a cached base layer (background, artboard, objects) plus
//! always-fresh overlays (selection chrome, rulers, gesture feedback).
//! The base layer is rebuilt only when its [`FrameKey`] changes or while a
//! gesture or text edit needs live content.

use crate::background::{draw_artboard, draw_background};
use crate::cache::{BaseLayerCache, FrameKey};
use crate::handles::draw_selection;
use crate::objects::draw_objects;
use crate::overlay::draw_overlays;
use crate::renderer::{FrameContext, Renderer};
use crate::rulers::draw_rulers;
use imprint_core::state::EditingState;
use imprint_core::viewport::CanvasTransform;
use parley::{FontContext, LayoutContext};
use peniko::Brush;
use vello::Scene;

/// Vello-backed canvas renderer.
pub struct CanvasRenderer {
    /// The scene being built for the current frame.
    scene: Scene,
    /// Font context (system font collection), cached across frames.
    font_cx: FontContext,
    /// Layout context for text, cached across frames.
    layout_cx: LayoutContext<Brush>,
    cache: BaseLayerCache,
    /// Number of base-layer rebuilds since creation.
    base_rebuilds: u64,
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            cache: BaseLayerCache::new(),
            base_rebuilds: 0,
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Get mutable references to both font and layout contexts.
    pub fn contexts_mut(&mut self) -> (&mut FontContext, &mut LayoutContext<Brush>) {
        (&mut self.font_cx, &mut self.layout_cx)
    }

    /// How many times the base layer has been rebuilt.
    pub fn base_rebuilds(&self) -> u64 {
        self.base_rebuilds
    }

    /// Drop the cached base layer.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }

    fn build_base(&mut self, target: &mut Scene, ctx: &FrameContext, transform: &CanvasTransform) {
        draw_background(target, ctx, transform);
        draw_artboard(target, ctx, transform);
        draw_objects(target, &mut self.font_cx, &mut self.layout_cx, ctx, transform);
        self.base_rebuilds += 1;
    }
}

impl Renderer for CanvasRenderer {
    fn build_scene(&mut self, ctx: &FrameContext) {
        self.scene.reset();
        let transform = CanvasTransform::new(
            &ctx.snapshot.document,
            &ctx.snapshot.viewport,
            ctx.canvas_size,
            ctx.view_scale,
        );

        // Live content (gestures, blinking caret) bypasses the cache.
        let live = ctx.interaction.gesture_active()
            || matches!(ctx.snapshot.editing, EditingState::Editing(_));
        if live {
            let mut base = std::mem::take(&mut self.scene);
            self.build_base(&mut base, ctx, &transform);
            self.scene = base;
            self.cache.invalidate();
        } else {
            let key = FrameKey::new(
                &ctx.snapshot.viewport,
                ctx.canvas_size,
                &ctx.snapshot.background,
                ctx.revision,
            );
            if let Some(cached) = self.cache.get(&key) {
                self.scene.append(cached, None);
            } else {
                let mut base = Scene::new();
                self.build_base(&mut base, ctx, &transform);
                self.scene.append(&base, None);
                self.cache.store(key, base);
            }
        }

        draw_selection(
            &mut self.scene,
            &mut self.font_cx,
            &mut self.layout_cx,
            ctx,
            &transform,
        );
        draw_overlays(&mut self.scene, &mut self.font_cx, &mut self.layout_cx, ctx);

        if ctx.show_rulers {
            draw_rulers(
                &mut self.scene,
                &mut self.font_cx,
                &mut self.layout_cx,
                ctx,
                &transform,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imprint_core::document::Document;
    use imprint_core::state::{EditorSnapshot, InteractionState};
    use kurbo::Size;

    fn frame<'a>(
        snapshot: &'a EditorSnapshot,
        interaction: &'a InteractionState,
    ) -> FrameContext<'a> {
        FrameContext::new(snapshot, interaction, Size::new(1600.0, 900.0))
    }

    #[test]
    fn test_base_layer_cached_across_identical_frames() {
        let snapshot = EditorSnapshot::new(Document::default());
        let interaction = InteractionState::default();
        let mut renderer = CanvasRenderer::new();

        renderer.build_scene(&frame(&snapshot, &interaction));
        renderer.build_scene(&frame(&snapshot, &interaction));
        assert_eq!(renderer.base_rebuilds(), 1);
    }

    #[test]
    fn test_pan_change_rebuilds_base_layer() {
        let mut snapshot = EditorSnapshot::new(Document::default());
        let interaction = InteractionState::default();
        let mut renderer = CanvasRenderer::new();

        renderer.build_scene(&frame(&snapshot, &interaction));
        snapshot.viewport.pan_x += 10.0;
        renderer.build_scene(&frame(&snapshot, &interaction));
        assert_eq!(renderer.base_rebuilds(), 2);
    }

    #[test]
    fn test_revision_bump_rebuilds_base_layer() {
        let snapshot = EditorSnapshot::new(Document::default());
        let interaction = InteractionState::default();
        let mut renderer = CanvasRenderer::new();

        renderer.build_scene(&frame(&snapshot, &interaction));
        renderer.build_scene(&frame(&snapshot, &interaction).with_revision(1));
        assert_eq!(renderer.base_rebuilds(), 2);
    }

    #[test]
    fn test_gesture_bypasses_cache_every_frame() {
        let snapshot = EditorSnapshot::new(Document::default());
        let interaction = InteractionState {
            is_panning: true,
            ..Default::default()
        };
        let mut renderer = CanvasRenderer::new();

        renderer.build_scene(&frame(&snapshot, &interaction));
        renderer.build_scene(&frame(&snapshot, &interaction));
        assert_eq!(renderer.base_rebuilds(), 2);
    }
}
