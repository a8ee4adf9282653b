//! Object drawing: z-ordered dispatch over the design object variants.

use crate::renderer::FrameContext;
use crate::text::draw_text_object;
use imprint_core::objects::{
    draw_order, BlendMode, DesignObject, LayerEffects, ObjectCommon, ShapeObject,
};
use imprint_core::state::EditingState;
use imprint_core::viewport::CanvasTransform;
use kurbo::{Affine, Rect, Stroke};
use parley::{FontContext, LayoutContext};
use peniko::{Brush, Color, Fill, Mix};
use vello::Scene;

/// Shadow substituted while an object is being dragged, suggesting lift.
const DRAG_LIFT_BLUR: f64 = 18.0;
const DRAG_LIFT_OFFSET: f64 = 6.0;
const DRAG_LIFT_ALPHA: f64 = 0.35;

fn mix_for(blend: BlendMode) -> Mix {
    match blend {
        BlendMode::Normal => Mix::Normal,
        BlendMode::Multiply => Mix::Multiply,
        BlendMode::Screen => Mix::Screen,
        BlendMode::Overlay => Mix::Overlay,
        BlendMode::Darken => Mix::Darken,
        BlendMode::Lighten => Mix::Lighten,
        BlendMode::ColorDodge => Mix::ColorDodge,
        BlendMode::ColorBurn => Mix::ColorBurn,
        BlendMode::HardLight => Mix::HardLight,
        BlendMode::SoftLight => Mix::SoftLight,
        BlendMode::Difference => Mix::Difference,
        BlendMode::Exclusion => Mix::Exclusion,
        BlendMode::Hue => Mix::Hue,
        BlendMode::Saturation => Mix::Saturation,
        BlendMode::Color => Mix::Color,
        BlendMode::Luminosity => Mix::Luminosity,
    }
}

/// Object bounds converted to artboard pixels.
pub fn local_rect(common: &ObjectCommon, transform: &CanvasTransform) -> Rect {
    let top_left = transform.document_to_artboard(common.bounds().origin());
    let bottom_right = transform
        .document_to_artboard(kurbo::Point::new(common.bounds().x1, common.bounds().y1));
    Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
}

/// Screen transform for an object, including its rotation about its own
/// center.
pub fn object_transform(common: &ObjectCommon, transform: &CanvasTransform) -> Affine {
    let local = local_rect(common, transform);
    transform.artboard_to_screen()
        * Affine::rotate_about(common.rotation_degrees().to_radians(), local.center())
}

/// Draw every visible object in ascending z-index order.
///
/// A single malformed object must not take down the frame: fallible steps
/// log and skip that object only.
pub fn draw_objects(
    scene: &mut Scene,
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<Brush>,
    ctx: &FrameContext,
    transform: &CanvasTransform,
) {
    let objects = &ctx.snapshot.objects;
    for index in draw_order(objects) {
        let object = &objects[index];
        let common = object.common();
        if !common.visible {
            continue;
        }

        let local = local_rect(common, transform);
        let object_affine = object_transform(common, transform);

        let dragging = ctx.interaction.is_dragging_object;
        let selected = ctx.snapshot.is_selected(object.id());
        draw_effects(scene, object_affine, local, &common.effects, dragging, selected);

        let composited = common.opacity < 1.0 || common.blend_mode != BlendMode::Normal;
        if composited {
            // Isolate the object so opacity/blend apply to it as a whole.
            let clip = local.inflate(64.0, 64.0);
            scene.push_layer(
                Fill::NonZero,
                mix_for(common.blend_mode),
                common.opacity.clamp(0.0, 1.0) as f32,
                object_affine,
                &clip,
            );
        }

        match object {
            DesignObject::Shape(shape) => draw_shape(scene, shape, local, object_affine),
            DesignObject::Path(path) => match path.to_path() {
                Ok(bez) => {
                    let placed =
                        object_affine * Affine::translate((local.x0, local.y0));
                    if let Some(fill) = path.fill {
                        scene.fill(Fill::NonZero, placed, Color::from(fill), None, &bez);
                    }
                    if let Some(stroke) = path.stroke {
                        scene.stroke(
                            &Stroke::new(path.stroke_width),
                            placed,
                            Color::from(stroke),
                            None,
                            &bez,
                        );
                    }
                }
                Err(err) => {
                    log::warn!("skipping path object {}: {err}", path.common.id);
                }
            },
            DesignObject::Text(text) => {
                let editing = matches!(
                    ctx.snapshot.editing,
                    EditingState::Editing(id) if id == text.common.id
                );
                draw_text_object(scene, font_cx, layout_cx, text, local, object_affine, editing);
            }
        }

        if composited {
            scene.pop_layer();
        }
    }
}

fn draw_shape(scene: &mut Scene, shape: &ShapeObject, local: Rect, transform: Affine) {
    let path = shape.to_path(local);
    if let Some(fill) = shape.fill {
        scene.fill(Fill::NonZero, transform, Color::from(fill), None, &path);
    }
    if let Some(stroke) = shape.stroke {
        scene.stroke(
            &Stroke::new(shape.stroke_width),
            transform,
            Color::from(stroke),
            None,
            &path,
        );
    }
}

/// What the effects pass renders for an object this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EffectPass {
    /// The object's configured shadow or glow.
    Configured,
    /// The lift shadow shown under a selection mid-drag.
    Lift,
    /// Nothing; configured effects are paused for the whole drag.
    Skip,
}

/// During a drag every object's configured effects are paused; only the
/// dragged selection gets the lift shadow.
pub(crate) fn effect_pass(dragging: bool, selected: bool) -> EffectPass {
    if !dragging {
        EffectPass::Configured
    } else if selected {
        EffectPass::Lift
    } else {
        EffectPass::Skip
    }
}

/// Draw the object's shadow or glow under it. At most one effect renders;
/// drop shadow wins.
fn draw_effects(
    scene: &mut Scene,
    transform: Affine,
    local: Rect,
    effects: &LayerEffects,
    dragging: bool,
    selected: bool,
) {
    match effect_pass(dragging, selected) {
        EffectPass::Skip => return,
        EffectPass::Lift => {
            let color = Color::BLACK.with_alpha(DRAG_LIFT_ALPHA as f32);
            scene.draw_blurred_rounded_rect(
                transform,
                local + kurbo::Vec2::new(0.0, DRAG_LIFT_OFFSET),
                color,
                0.0,
                DRAG_LIFT_BLUR,
            );
            return;
        }
        EffectPass::Configured => {}
    }

    if let Some(shadow) = effects.drop_shadow {
        let color = Color::from(shadow.color.with_opacity(shadow.opacity));
        scene.draw_blurred_rounded_rect(
            transform,
            local + kurbo::Vec2::new(shadow.offset_x, shadow.offset_y),
            color,
            0.0,
            shadow.blur.max(0.01),
        );
    } else if let Some(glow) = effects.outer_glow {
        let color = Color::from(glow.color.with_opacity(glow.opacity));
        scene.draw_blurred_rounded_rect(transform, local, color, 0.0, glow.blur.max(0.01));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_paused_for_everyone_during_drag() {
        // At rest, every object renders its configured effects.
        assert_eq!(effect_pass(false, false), EffectPass::Configured);
        assert_eq!(effect_pass(false, true), EffectPass::Configured);

        // Mid-drag the selection swaps to the lift shadow and every other
        // object drops its effects entirely.
        assert_eq!(effect_pass(true, true), EffectPass::Lift);
        assert_eq!(effect_pass(true, false), EffectPass::Skip);
    }
}
