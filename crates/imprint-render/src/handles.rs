//! Selection outlines and transform handles.
//!
//! Handle geometry lives in artboard space so it rotates with the object;
//! sizes come from [`HandleMetrics`] and stay visually constant on screen.

use crate::objects::{local_rect, object_transform};
use crate::renderer::FrameContext;
use crate::text::draw_label;
use imprint_core::handles::{HandleId, HandleMetrics};
use imprint_core::objects::DesignObject;
use imprint_core::state::InteractionState;
use imprint_core::viewport::CanvasTransform;
use kurbo::{Affine, Circle, Line, Point, Rect, Stroke};
use parley::{FontContext, LayoutContext};
use peniko::{Brush, Color, Fill};
use vello::Scene;

const HANDLE_FILL: Color = Color::WHITE;
const READOUT_COLOR: Color = Color::from_rgba8(229, 231, 235, 255);
const READOUT_BACKGROUND: Color = Color::from_rgba8(17, 24, 39, 230);

/// Center of a handle on the padded selection rectangle.
pub fn handle_position(id: HandleId, padded: Rect, metrics: &HandleMetrics) -> Point {
    let cx = padded.center().x;
    let cy = padded.center().y;
    match id {
        HandleId::Nw => Point::new(padded.x0, padded.y0),
        HandleId::Ne => Point::new(padded.x1, padded.y0),
        HandleId::Se => Point::new(padded.x1, padded.y1),
        HandleId::Sw => Point::new(padded.x0, padded.y1),
        HandleId::N => Point::new(cx, padded.y0),
        HandleId::E => Point::new(padded.x1, cy),
        HandleId::S => Point::new(cx, padded.y1),
        HandleId::W => Point::new(padded.x0, cy),
        HandleId::Rotate => Point::new(cx, padded.y0 - metrics.rotation_offset),
    }
}

/// Selection rectangle inflated by the zoom-compensated padding, with the
/// extra allowance for text objects.
pub fn padded_bounds(object: &DesignObject, local: Rect, metrics: &HandleMetrics) -> Rect {
    let mut pad = metrics.selection_padding;
    if matches!(object, DesignObject::Text(_)) {
        pad += metrics.text_extra_padding;
    }
    local.inflate(pad, pad)
}

/// Selection chrome is hidden while the selection itself is being moved.
pub fn chrome_visible(interaction: &InteractionState) -> bool {
    !interaction.is_dragging_object
}

/// Whether the rotation readout should appear this frame.
pub fn rotation_readout_active(interaction: &InteractionState) -> bool {
    interaction.is_transforming && interaction.transform_handle == Some(HandleId::Rotate)
}

/// Draw selection chrome for every selected object.
pub fn draw_selection(
    scene: &mut Scene,
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<Brush>,
    ctx: &FrameContext,
    transform: &CanvasTransform,
) {
    if !chrome_visible(ctx.interaction) {
        return;
    }

    let metrics = HandleMetrics::for_zoom(transform.effective_zoom());
    let mut readout_drawn = false;
    for &id in &ctx.snapshot.selected_ids {
        let Some(object) = ctx.snapshot.object(id) else {
            continue;
        };
        let common = object.common();
        let local = local_rect(common, transform);
        let object_affine = object_transform(common, transform);
        let padded = padded_bounds(object, local, &metrics);

        draw_outline(scene, ctx, &metrics, padded, object_affine);
        draw_handles(scene, ctx, &metrics, padded, object_affine);

        // One readout for the primary selection, only mid-rotation.
        if !readout_drawn && rotation_readout_active(ctx.interaction) {
            if let Some(angle) = ctx.interaction.current_rotation {
                draw_rotation_readout(
                    scene, font_cx, layout_cx, &metrics, padded, object_affine, angle,
                );
                readout_drawn = true;
            }
        }
    }
}

fn draw_outline(
    scene: &mut Scene,
    ctx: &FrameContext,
    metrics: &HandleMetrics,
    padded: Rect,
    object_affine: Affine,
) {
    let stroke = Stroke::new(metrics.line_width);
    scene.stroke(&stroke, object_affine, ctx.selection_color, None, &padded);

    // Faint second border just outside, to lift the outline off busy art.
    let outer = padded.inflate(metrics.selection_stroke_padding, metrics.selection_stroke_padding);
    let faint = ctx.selection_color.with_alpha(0.35);
    scene.stroke(&Stroke::new(metrics.line_width * 0.6), object_affine, faint, None, &outer);
}

fn draw_handles(
    scene: &mut Scene,
    ctx: &FrameContext,
    metrics: &HandleMetrics,
    padded: Rect,
    object_affine: Affine,
) {
    let stroke = Stroke::new(metrics.line_width);

    // Hovered edge handles also light up their whole edge.
    if let Some(hovered) = ctx.interaction.hovered_handle {
        if hovered.is_edge() {
            let edge = match hovered {
                HandleId::N => Line::new((padded.x0, padded.y0), (padded.x1, padded.y0)),
                HandleId::S => Line::new((padded.x0, padded.y1), (padded.x1, padded.y1)),
                HandleId::E => Line::new((padded.x1, padded.y0), (padded.x1, padded.y1)),
                _ => Line::new((padded.x0, padded.y0), (padded.x0, padded.y1)),
            };
            scene.stroke(
                &Stroke::new(metrics.line_width * 2.0),
                object_affine,
                ctx.selection_color,
                None,
                &edge,
            );
        }
    }

    // Stem from the top edge to the rotation handle.
    let top_center = Point::new(padded.center().x, padded.y0);
    let rotate_center = handle_position(HandleId::Rotate, padded, metrics);
    scene.stroke(
        &stroke,
        object_affine,
        ctx.selection_color,
        None,
        &Line::new(top_center, rotate_center),
    );

    let shadow_offset = kurbo::Vec2::new(0.0, metrics.line_width);
    for id in HandleId::CORNERS.into_iter().chain(HandleId::EDGES) {
        let hovered = ctx.interaction.hovered_handle == Some(id);
        let radius = if hovered {
            metrics.hover_radius
        } else {
            metrics.radius
        };
        let center = handle_position(id, padded, metrics);
        let shadow = Circle::new(center + shadow_offset, radius);
        scene.fill(
            Fill::NonZero,
            object_affine,
            Color::BLACK.with_alpha(0.25),
            None,
            &shadow,
        );
        let circle = Circle::new(center, radius);
        scene.fill(Fill::NonZero, object_affine, HANDLE_FILL, None, &circle);
        scene.stroke(&stroke, object_affine, ctx.selection_color, None, &circle);
    }

    let rotate_hovered = ctx.interaction.hovered_handle == Some(HandleId::Rotate);
    let rotate_radius = if rotate_hovered {
        metrics.rotation_radius_hovered
    } else {
        metrics.rotation_radius
    };
    let rotate = Circle::new(rotate_center, rotate_radius);
    scene.fill(Fill::NonZero, object_affine, HANDLE_FILL, None, &rotate);
    scene.stroke(&stroke, object_affine, ctx.selection_color, None, &rotate);
}

/// Angle readout shown beside the rotation handle during a rotate gesture,
/// with a dashed guide through the object center.
#[allow(clippy::too_many_arguments)]
fn draw_rotation_readout(
    scene: &mut Scene,
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<Brush>,
    metrics: &HandleMetrics,
    padded: Rect,
    object_affine: Affine,
    angle: f64,
) {
    let rotate_center = handle_position(HandleId::Rotate, padded, metrics);
    let guide = Line::new(padded.center(), rotate_center);
    let dashed = Stroke::new(metrics.line_width * 0.75).with_dashes(0.0, [metrics.radius; 2]);
    scene.stroke(
        &dashed,
        object_affine,
        READOUT_COLOR.with_alpha(0.6),
        None,
        &guide,
    );

    // Readout drawn in screen space so the label never rotates or scales.
    let anchor = object_affine * rotate_center;
    let label = format!("{:.0}\u{00b0}", angle.rem_euclid(360.0));
    let pill = Rect::new(anchor.x + 12.0, anchor.y - 10.0, anchor.x + 58.0, anchor.y + 10.0)
        .to_rounded_rect(5.0);
    scene.fill(Fill::NonZero, Affine::IDENTITY, READOUT_BACKGROUND, None, &pill);
    draw_label(
        scene,
        font_cx,
        layout_cx,
        &label,
        Point::new(anchor.x + 18.0, anchor.y - 7.0),
        11.0,
        READOUT_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_positions_on_padded_rect() {
        let metrics = HandleMetrics::for_zoom(1.0);
        let rect = Rect::new(0.0, 0.0, 100.0, 60.0);
        assert_eq!(handle_position(HandleId::Nw, rect, &metrics), Point::new(0.0, 0.0));
        assert_eq!(handle_position(HandleId::Se, rect, &metrics), Point::new(100.0, 60.0));
        assert_eq!(handle_position(HandleId::N, rect, &metrics), Point::new(50.0, 0.0));
        assert_eq!(handle_position(HandleId::W, rect, &metrics), Point::new(0.0, 30.0));

        let rotate = handle_position(HandleId::Rotate, rect, &metrics);
        assert_eq!(rotate.x, 50.0);
        assert!((rotate.y - (0.0 - metrics.rotation_offset)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_chrome_hidden_while_dragging_selection() {
        let mut interaction = InteractionState::default();
        assert!(chrome_visible(&interaction));
        interaction.is_dragging_object = true;
        assert!(!chrome_visible(&interaction));
        // Other gestures leave the chrome alone.
        interaction.is_dragging_object = false;
        interaction.is_panning = true;
        assert!(chrome_visible(&interaction));
    }

    #[test]
    fn test_rotation_readout_requires_rotate_gesture() {
        let mut interaction = InteractionState {
            current_rotation: Some(45.0),
            ..Default::default()
        };
        // An angle alone is not enough.
        assert!(!rotation_readout_active(&interaction));

        interaction.is_transforming = true;
        interaction.transform_handle = Some(HandleId::Se);
        assert!(!rotation_readout_active(&interaction));

        interaction.transform_handle = Some(HandleId::Rotate);
        assert!(rotation_readout_active(&interaction));
    }
}
