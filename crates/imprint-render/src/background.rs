//! Workspace background, pattern fills and artboard chrome.
//!
//! Patterns keep a constant screen-pixel spacing but are anchored to the
//! artboard origin, so they track panning without rescaling on zoom.

use crate::renderer::FrameContext;
use crate::tile::{checkerboard_tile, dots_tile, PatternTile};
use imprint_core::document::WORKSPACE_SIZE;
use imprint_core::objects::SerializableColor;
use imprint_core::state::BackgroundKind;
use imprint_core::viewport::CanvasTransform;
use kurbo::{Affine, Line, Point, Rect, Stroke};
use peniko::{Brush, Color, Extend, Fill};
use vello::Scene;

const WORKSPACE_FILL: Color = Color::from_rgba8(30, 30, 30, 255);
const WORKSPACE_BORDER: Color = Color::from_rgba8(80, 80, 80, 255);
const ARTBOARD_FILL: Color = Color::WHITE;
const BLEED_COLOR: Color = Color::from_rgba8(239, 68, 68, 255);
const TRIM_COLOR: Color = Color::from_rgba8(59, 130, 246, 255);
const DRAG_ACCENT: Color = Color::from_rgba8(96, 165, 250, 255);

fn workspace_rect(ctx: &FrameContext) -> Rect {
    let artboard = ctx.snapshot.artboard;
    Rect::from_center_size(
        Point::new(artboard.width / 2.0, artboard.height / 2.0),
        kurbo::Size::new(WORKSPACE_SIZE, WORKSPACE_SIZE),
    )
}

fn tile_brush(tile: &PatternTile) -> Brush {
    let data = peniko::ImageData {
        data: peniko::Blob::new(std::sync::Arc::new(tile.pixels.clone())),
        format: peniko::ImageFormat::Rgba8,
        width: tile.side,
        height: tile.side,
        alpha_type: peniko::ImageAlphaType::Alpha,
    };
    Brush::Image(peniko::ImageBrush {
        image: data,
        sampler: peniko::ImageSampler {
            x_extend: Extend::Repeat,
            y_extend: Extend::Repeat,
            ..Default::default()
        },
    })
}

/// Fill the chrome, the workspace plane, and its background pattern.
pub fn draw_background(scene: &mut Scene, ctx: &FrameContext, transform: &CanvasTransform) {
    let canvas = Rect::new(0.0, 0.0, ctx.canvas_size.width, ctx.canvas_size.height);
    scene.fill(Fill::NonZero, Affine::IDENTITY, ctx.chrome_color, None, &canvas);

    let to_screen = transform.artboard_to_screen();
    let effective_zoom = transform.effective_zoom();
    let workspace = workspace_rect(ctx);
    let config = &ctx.snapshot.background;

    scene.fill(Fill::NonZero, to_screen, WORKSPACE_FILL, None, &workspace);

    let color = SerializableColor::from_hex_or_neutral(&config.color);
    // Patterns are drawn in screen space, clipped to the workspace plane
    // and anchored to the artboard origin.
    let origin = to_screen * Point::ZERO;
    match config.kind {
        BackgroundKind::Transparent => {}
        BackgroundKind::Solid => {
            let fill = Color::from(color.with_opacity(config.opacity));
            scene.fill(Fill::NonZero, to_screen, fill, None, &workspace);
        }
        BackgroundKind::Grid => {
            scene.push_clip_layer(Fill::NonZero, to_screen, &workspace);
            draw_grid_lines(scene, canvas, origin, config.grid_size, color, config.opacity);
            scene.pop_layer();
        }
        BackgroundKind::Dots => {
            let tile = dots_tile(config.grid_size, color, config.opacity);
            fill_pattern(scene, canvas, &workspace, to_screen, origin, &tile);
        }
        BackgroundKind::Checkerboard => {
            let tile = checkerboard_tile(config.grid_size, color, config.opacity);
            fill_pattern(scene, canvas, &workspace, to_screen, origin, &tile);
        }
    }

    // Dashed boundary marking the edge of the finite workspace.
    let border = Stroke::new(1.5 / effective_zoom).with_dashes(0.0, [8.0 / effective_zoom; 2]);
    scene.stroke(&border, to_screen, WORKSPACE_BORDER, None, &workspace);
}

fn fill_pattern(
    scene: &mut Scene,
    canvas: Rect,
    workspace: &Rect,
    to_screen: Affine,
    origin: Point,
    tile: &PatternTile,
) {
    scene.push_clip_layer(Fill::NonZero, to_screen, workspace);
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        &tile_brush(tile),
        Some(Affine::translate(origin.to_vec2())),
        &canvas,
    );
    scene.pop_layer();
}

fn draw_grid_lines(
    scene: &mut Scene,
    canvas: Rect,
    origin: Point,
    grid_size: f64,
    color: SerializableColor,
    opacity: f64,
) {
    let spacing = grid_size.max(2.0);
    let line_color = Color::from(color.with_opacity(opacity));
    let stroke = Stroke::new(1.0);

    let mut x = origin.x.rem_euclid(spacing);
    while x <= canvas.x1 {
        let line = Line::new((x, canvas.y0), (x, canvas.y1));
        scene.stroke(&stroke, Affine::IDENTITY, line_color, None, &line);
        x += spacing;
    }
    let mut y = origin.y.rem_euclid(spacing);
    while y <= canvas.y1 {
        let line = Line::new((canvas.x0, y), (canvas.x1, y));
        scene.stroke(&stroke, Affine::IDENTITY, line_color, None, &line);
        y += spacing;
    }
}

/// Draw the artboard surface with its bleed and trim guides.
pub fn draw_artboard(scene: &mut Scene, ctx: &FrameContext, transform: &CanvasTransform) {
    let to_screen = transform.artboard_to_screen();
    let effective_zoom = transform.effective_zoom();
    let artboard = ctx.snapshot.artboard;

    let bleed_rect = artboard.bleed_rect();
    let trim_rect = artboard.trim_rect();

    // Drop shadow under the paper; deeper while the artboard is dragged.
    let (shadow_alpha, shadow_blur) = if ctx.interaction.is_dragging_artboard {
        (0.45_f32, 32.0 / effective_zoom)
    } else {
        (0.3_f32, 20.0 / effective_zoom)
    };
    scene.draw_blurred_rounded_rect(
        to_screen,
        bleed_rect + kurbo::Vec2::new(0.0, 4.0 / effective_zoom),
        Color::BLACK.with_alpha(shadow_alpha),
        0.0,
        shadow_blur,
    );

    // Paper surface covers the full bleed area.
    scene.fill(Fill::NonZero, to_screen, ARTBOARD_FILL, None, &bleed_rect);

    if artboard.bleed > 0.0 {
        let bleed_stroke =
            Stroke::new(1.0 / effective_zoom).with_dashes(0.0, [4.0 / effective_zoom; 2]);
        scene.stroke(&bleed_stroke, to_screen, BLEED_COLOR, None, &bleed_rect);
    }

    let trim_stroke = Stroke::new(1.0 / effective_zoom);
    scene.stroke(&trim_stroke, to_screen, TRIM_COLOR, None, &trim_rect);

    // Live feedback while the artboard itself is being dragged.
    if ctx.interaction.is_dragging_artboard {
        let accent = Stroke::new(2.0 / effective_zoom);
        scene.stroke(&accent, to_screen, DRAG_ACCENT, None, &bleed_rect);
    }
}
