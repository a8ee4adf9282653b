//! Screen-space gesture overlays: marquee, text drag preview, tool badge.

use crate::renderer::FrameContext;
use crate::text::draw_label;
use imprint_core::state::Tool;
use kurbo::{Affine, Point, Rect, Stroke};
use parley::{FontContext, LayoutContext};
use peniko::{Brush, Color, Fill};
use vello::Scene;

const MARQUEE_FILL: Color = Color::from_rgba8(59, 130, 246, 40);
const MARQUEE_BORDER: Color = Color::from_rgba8(59, 130, 246, 200);
const PREVIEW_BORDER: Color = Color::from_rgba8(37, 99, 235, 220);
const BADGE_BACKGROUND: Color = Color::from_rgba8(17, 24, 39, 230);
const BADGE_TEXT: Color = Color::from_rgba8(229, 231, 235, 255);

/// Draw the frame's transient overlays on top of everything else.
pub fn draw_overlays(
    scene: &mut Scene,
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<Brush>,
    ctx: &FrameContext,
) {
    if let Some(marquee) = ctx.interaction.visible_marquee() {
        draw_marquee(scene, marquee);
    }

    if let Some(preview) = ctx.interaction.text_drag {
        draw_text_drag_preview(scene, preview.rect());
    }

    if ctx.interaction.active_tool != Tool::Select {
        draw_tool_badge(scene, font_cx, layout_cx, ctx);
    }
}

fn draw_marquee(scene: &mut Scene, rect: Rect) {
    scene.fill(Fill::NonZero, Affine::IDENTITY, MARQUEE_FILL, None, &rect);
    scene.stroke(
        &Stroke::new(1.0),
        Affine::IDENTITY,
        MARQUEE_BORDER,
        None,
        &rect,
    );
}

fn draw_text_drag_preview(scene: &mut Scene, rect: Rect) {
    let dashed = Stroke::new(1.5).with_dashes(0.0, [5.0, 4.0]);
    scene.stroke(&dashed, Affine::IDENTITY, PREVIEW_BORDER, None, &rect);
}

fn tool_name(tool: Tool) -> &'static str {
    match tool {
        Tool::Select => "Select",
        Tool::Text => "Text",
        Tool::Shape => "Shape",
        Tool::Pan => "Pan",
    }
}

/// Small badge naming the active tool, bottom-left of the canvas.
fn draw_tool_badge(
    scene: &mut Scene,
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<Brush>,
    ctx: &FrameContext,
) {
    let name = tool_name(ctx.interaction.active_tool);
    let origin = Point::new(12.0, ctx.canvas_size.height - 34.0);
    let pill = Rect::new(origin.x, origin.y, origin.x + 64.0, origin.y + 22.0)
        .to_rounded_rect(6.0);
    scene.fill(Fill::NonZero, Affine::IDENTITY, BADGE_BACKGROUND, None, &pill);
    draw_label(
        scene,
        font_cx,
        layout_cx,
        name,
        Point::new(origin.x + 10.0, origin.y + 4.0),
        11.0,
        BADGE_TEXT,
    );
}
