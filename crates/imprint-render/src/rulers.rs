//! Measurement rulers along the top and left canvas edges.
//!
//! Tick selection is pure math over the effective zoom so it can be tested
//! directly; drawing walks the visible document range and emits tick lines,
//! labels and the cursor position indicator.

use imprint_core::document::{Unit, WORKSPACE_SIZE};

/// Major tick interval in document units for an effective zoom level.
///
/// Zoomed out, the base interval is subdivided for more detail (but
/// base-1 units stay at whole numbers); zoomed in, it grows up to 4x the
/// base to avoid clutter. Intervals are always whole units, so major
/// labels land on whole-unit positions.
pub fn tick_interval(unit: Unit, effective_zoom: f64) -> f64 {
    let base = unit.base_tick_interval();
    if effective_zoom <= 0.125 {
        if base == 1.0 {
            1.0
        } else {
            (base / 4.0).floor().max(1.0)
        }
    } else if effective_zoom <= 0.2 {
        if base == 1.0 {
            1.0
        } else {
            (base / 2.0).floor().max(1.0)
        }
    } else if effective_zoom >= 0.5 {
        base * (effective_zoom / 0.25).ceil().min(4.0)
    } else {
        base
    }
}

/// Minor ticks subdivide each major interval into quarters.
pub fn minor_interval(major: f64) -> f64 {
    major / 4.0
}

/// Multiples of `interval` covering `[start, end]`, aligned to zero.
pub fn tick_values(start: f64, end: f64, interval: f64) -> Vec<f64> {
    if interval <= 0.0 || !start.is_finite() || !end.is_finite() || end < start {
        return Vec::new();
    }
    let mut values = Vec::new();
    let mut i = (start / interval).floor() as i64;
    loop {
        let value = i as f64 * interval;
        if value > end + interval * 1e-9 {
            break;
        }
        if value >= start - interval * 1e-9 {
            values.push(value);
        }
        i += 1;
    }
    values
}

/// True when `value` lands on a multiple of `major` (minor ticks skip
/// positions already drawn as majors).
pub fn is_major(value: f64, major: f64) -> bool {
    let remainder = (value / major).round() * major - value;
    remainder.abs() < major * 1e-6
}

/// Tick label text: whole numbers without a fraction, otherwise two
/// decimals with trailing zeros trimmed.
pub fn format_tick_label(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Clamp a visible document range to the workspace extent.
///
/// `units_per_artboard_px` converts the workspace size (artboard pixels)
/// into document units.
pub fn clamp_to_workspace(start: f64, end: f64, units_per_artboard_px: f64) -> (f64, f64) {
    let half = WORKSPACE_SIZE / 2.0 * units_per_artboard_px;
    (start.max(-half), end.min(half))
}

#[cfg(feature = "vello-renderer")]
pub use draw::draw_rulers;

#[cfg(feature = "vello-renderer")]
mod draw {
    use super::{format_tick_label, is_major, minor_interval, tick_interval, tick_values};
    use crate::renderer::FrameContext;
    use crate::text::draw_label;
    use imprint_core::document::{format_unit_value, RULER_SIZE};
    use imprint_core::viewport::CanvasTransform;
    use kurbo::{Line, Point, Rect, Stroke};
    use parley::{FontContext, LayoutContext};
    use peniko::{Brush, Color, Fill};
    use vello::Scene;

    const RULER_BACKGROUND: Color = Color::from_rgba8(48, 48, 48, 255);
    const RULER_BORDER: Color = Color::from_rgba8(70, 70, 70, 255);
    const TICK_COLOR: Color = Color::from_rgba8(140, 140, 140, 255);
    const LABEL_COLOR: Color = Color::from_rgba8(190, 190, 190, 255);
    const CURSOR_COLOR: Color = Color::from_rgba8(96, 165, 250, 255);
    const LABEL_SIZE: f32 = 9.0;

    /// Draw both rulers, the corner square, and the cursor indicators.
    pub fn draw_rulers(
        scene: &mut Scene,
        font_cx: &mut FontContext,
        layout_cx: &mut LayoutContext<Brush>,
        ctx: &FrameContext,
        transform: &CanvasTransform,
    ) {
        let width = ctx.canvas_size.width;
        let height = ctx.canvas_size.height;
        let unit = ctx.snapshot.document.unit;
        let effective_zoom = transform.effective_zoom();

        // Ruler strips.
        let top = Rect::new(0.0, 0.0, width, RULER_SIZE);
        let left = Rect::new(0.0, 0.0, RULER_SIZE, height);
        scene.fill(Fill::NonZero, kurbo::Affine::IDENTITY, RULER_BACKGROUND, None, &top);
        scene.fill(Fill::NonZero, kurbo::Affine::IDENTITY, RULER_BACKGROUND, None, &left);

        let border = Stroke::new(1.0);
        scene.stroke(
            &border,
            kurbo::Affine::IDENTITY,
            RULER_BORDER,
            None,
            &Line::new((0.0, RULER_SIZE), (width, RULER_SIZE)),
        );
        scene.stroke(
            &border,
            kurbo::Affine::IDENTITY,
            RULER_BORDER,
            None,
            &Line::new((RULER_SIZE, 0.0), (RULER_SIZE, height)),
        );

        let major = tick_interval(unit, effective_zoom);
        let minor = minor_interval(major);

        draw_axis(
            scene, font_cx, layout_cx, ctx, transform, Axis::Horizontal, major, minor,
        );
        draw_axis(
            scene, font_cx, layout_cx, ctx, transform, Axis::Vertical, major, minor,
        );

        if let Some(cursor) = ctx.interaction.cursor {
            draw_cursor_indicator(scene, font_cx, layout_cx, ctx, transform, cursor);
        }

        // Corner square with the unit label.
        let corner = Rect::new(0.0, 0.0, RULER_SIZE, RULER_SIZE);
        scene.fill(Fill::NonZero, kurbo::Affine::IDENTITY, RULER_BACKGROUND, None, &corner);
        draw_label(
            scene,
            font_cx,
            layout_cx,
            unit.label(),
            Point::new(6.0, RULER_SIZE / 2.0 - 6.0),
            LABEL_SIZE,
            LABEL_COLOR,
        );
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Axis {
        Horizontal,
        Vertical,
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_axis(
        scene: &mut Scene,
        font_cx: &mut FontContext,
        layout_cx: &mut LayoutContext<Brush>,
        ctx: &FrameContext,
        transform: &CanvasTransform,
        axis: Axis,
        major: f64,
        minor: f64,
    ) {
        let extent = match axis {
            Axis::Horizontal => ctx.canvas_size.width,
            Axis::Vertical => ctx.canvas_size.height,
        };

        // Visible document range along this axis.
        let doc_at = |screen: f64| {
            let p = match axis {
                Axis::Horizontal => Point::new(screen, 0.0),
                Axis::Vertical => Point::new(0.0, screen),
            };
            let doc = transform.to_document(p);
            match axis {
                Axis::Horizontal => doc.x,
                Axis::Vertical => doc.y,
            }
        };
        let units_per_artboard_px = 1.0
            / transform
                .document_to_artboard(Point::new(1.0, 0.0))
                .x
                .max(f64::EPSILON);
        let (start, end) =
            super::clamp_to_workspace(doc_at(RULER_SIZE), doc_at(extent), units_per_artboard_px);

        let tick_stroke = Stroke::new(1.0);

        // Guide lines at the edges of the computed range.
        for boundary in [start, end] {
            let screen = match axis {
                Axis::Horizontal => transform.to_screen(Point::new(boundary, 0.0)).x,
                Axis::Vertical => transform.to_screen(Point::new(0.0, boundary)).y,
            };
            if screen < RULER_SIZE {
                continue;
            }
            let line = match axis {
                Axis::Horizontal => Line::new((screen, 0.0), (screen, RULER_SIZE)),
                Axis::Vertical => Line::new((0.0, screen), (RULER_SIZE, screen)),
            };
            scene.stroke(&tick_stroke, kurbo::Affine::IDENTITY, RULER_BORDER, None, &line);
        }

        for value in tick_values(start, end, minor) {
            let screen = match axis {
                Axis::Horizontal => transform.to_screen(Point::new(value, 0.0)).x,
                Axis::Vertical => transform.to_screen(Point::new(0.0, value)).y,
            };
            if screen < RULER_SIZE {
                continue;
            }
            let major_tick = is_major(value, major);
            let depth = if major_tick {
                RULER_SIZE * 0.5
            } else {
                RULER_SIZE * 0.22
            };
            let line = match axis {
                Axis::Horizontal => Line::new((screen, RULER_SIZE - depth), (screen, RULER_SIZE)),
                Axis::Vertical => Line::new((RULER_SIZE - depth, screen), (RULER_SIZE, screen)),
            };
            scene.stroke(&tick_stroke, kurbo::Affine::IDENTITY, TICK_COLOR, None, &line);

            if major_tick {
                let label = format_tick_label(value);
                let origin = match axis {
                    Axis::Horizontal => Point::new(screen + 3.0, 2.0),
                    Axis::Vertical => Point::new(3.0, screen + 2.0),
                };
                draw_label(scene, font_cx, layout_cx, &label, origin, LABEL_SIZE, LABEL_COLOR);
            }
        }
    }

    fn draw_cursor_indicator(
        scene: &mut Scene,
        font_cx: &mut FontContext,
        layout_cx: &mut LayoutContext<Brush>,
        ctx: &FrameContext,
        transform: &CanvasTransform,
        cursor: Point,
    ) {
        if cursor.x < RULER_SIZE || cursor.y < RULER_SIZE {
            return;
        }
        let stroke = Stroke::new(1.0);
        scene.stroke(
            &stroke,
            kurbo::Affine::IDENTITY,
            CURSOR_COLOR,
            None,
            &Line::new((cursor.x, 0.0), (cursor.x, RULER_SIZE)),
        );
        scene.stroke(
            &stroke,
            kurbo::Affine::IDENTITY,
            CURSOR_COLOR,
            None,
            &Line::new((0.0, cursor.y), (RULER_SIZE, cursor.y)),
        );

        // Rounded unit readouts beside the indicator lines.
        let doc = transform.to_document(cursor);
        let x_label = format_tick_label(format_unit_value(doc.x));
        let y_label = format_tick_label(format_unit_value(doc.y));
        draw_label(
            scene,
            font_cx,
            layout_cx,
            &x_label,
            Point::new(cursor.x + 4.0, RULER_SIZE * 0.55),
            LABEL_SIZE,
            CURSOR_COLOR,
        );
        draw_label(
            scene,
            font_cx,
            layout_cx,
            &y_label,
            Point::new(2.0, cursor.y + 4.0),
            LABEL_SIZE,
            CURSOR_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_bands() {
        // Inches: base 1 stays at whole numbers when zoomed out, grows
        // when zoomed in.
        assert!((tick_interval(Unit::In, 0.25) - 1.0).abs() < f64::EPSILON);
        assert!((tick_interval(Unit::In, 0.1) - 1.0).abs() < f64::EPSILON);
        assert!((tick_interval(Unit::In, 0.15) - 1.0).abs() < f64::EPSILON);
        assert!((tick_interval(Unit::In, 0.5) - 2.0).abs() < f64::EPSILON);
        assert!((tick_interval(Unit::In, 0.8) - 4.0).abs() < f64::EPSILON);
        assert!((tick_interval(Unit::In, 1.0) - 4.0).abs() < f64::EPSILON);
        // Growth is capped at 4x the base.
        assert!((tick_interval(Unit::In, 10.0) - 4.0).abs() < f64::EPSILON);
        // Pixels use a 100px base, subdivided when zoomed out.
        assert!((tick_interval(Unit::Px, 0.25) - 100.0).abs() < f64::EPSILON);
        assert!((tick_interval(Unit::Px, 0.1) - 25.0).abs() < f64::EPSILON);
        assert!((tick_interval(Unit::Px, 0.15) - 50.0).abs() < f64::EPSILON);
        assert!((tick_interval(Unit::Px, 1.0) - 400.0).abs() < f64::EPSILON);
        // Millimeters use a 10mm base.
        assert!((tick_interval(Unit::Mm, 0.25) - 10.0).abs() < f64::EPSILON);
        assert!((tick_interval(Unit::Mm, 0.1) - 2.0).abs() < f64::EPSILON);
        assert!((tick_interval(Unit::Mm, 0.15) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tick_values_aligned_to_zero() {
        assert_eq!(tick_values(-2.5, 2.5, 1.0), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(tick_values(0.1, 0.9, 1.0), Vec::<f64>::new());
        assert_eq!(tick_values(0.0, 0.0, 1.0), vec![0.0]);
    }

    #[test]
    fn test_tick_values_degenerate_inputs() {
        assert!(tick_values(0.0, 10.0, 0.0).is_empty());
        assert!(tick_values(10.0, 0.0, 1.0).is_empty());
        assert!(tick_values(f64::NAN, 10.0, 1.0).is_empty());
    }

    #[test]
    fn test_minor_quarters_and_major_detection() {
        let major = 1.0;
        let minor = minor_interval(major);
        assert!((minor - 0.25).abs() < f64::EPSILON);
        assert!(is_major(2.0, major));
        assert!(is_major(-3.0, major));
        assert!(!is_major(0.25, major));
        assert!(!is_major(0.75, major));
    }

    #[test]
    fn test_label_formatting() {
        assert_eq!(format_tick_label(2.0), "2");
        assert_eq!(format_tick_label(-3.0), "-3");
        assert_eq!(format_tick_label(0.25), "0.25");
        assert_eq!(format_tick_label(0.5), "0.5");
    }

    #[test]
    fn test_workspace_clamp() {
        let (start, end) = clamp_to_workspace(-1e9, 1e9, 1.0);
        assert!((start + WORKSPACE_SIZE / 2.0).abs() < f64::EPSILON);
        assert!((end - WORKSPACE_SIZE / 2.0).abs() < f64::EPSILON);
    }
}
