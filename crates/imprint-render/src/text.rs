//! Text drawing via Parley layouts.
//!
//! Line breaking, list markers and case transforms are computed by
//! `imprint_core::text_layout`; this module supplies the Parley-backed
//! measurer those routines need and turns the resulting lines into glyph
//! runs. Each wrapped line gets its own single-line layout so vertical
//! placement follows the object's own line-height setting.

use imprint_core::objects::text::{FontStyle, ListType, TextAlign, TextObject, VerticalAlign};
use imprint_core::objects::WrapMode;
use imprint_core::path_sample::{parse_path, path_length, sample_bez_path};
use imprint_core::text_layout::{self, TextMeasure};
use kurbo::{Affine, Line, Point, Rect, Stroke, Vec2};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use vello::Scene;

const PLACEHOLDER_COLOR: Color = Color::from_rgba8(156, 163, 175, 255);
const EDIT_HIGHLIGHT: Color = Color::from_rgba8(59, 130, 246, 26);
const CARET_COLOR: Color = Color::from_rgba8(37, 99, 235, 255);
const CARET_BLINK_MILLIS: u64 = 500;

/// Wall-clock milliseconds, for caret blinking.
pub fn now_millis() -> u64 {
    #[cfg(target_arch = "wasm32")]
    use web_time::{SystemTime, UNIX_EPOCH};
    #[cfg(not(target_arch = "wasm32"))]
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Whether the caret is in the visible half of its blink cycle.
pub fn caret_visible(millis: u64) -> bool {
    millis / CARET_BLINK_MILLIS % 2 == 0
}

/// Font settings shared by measuring and drawing so both see identical
/// advances.
#[derive(Clone)]
struct FontSpec {
    family: String,
    size: f32,
    weight: parley::FontWeight,
    style: parley::FontStyle,
}

impl FontSpec {
    fn for_object(text: &TextObject) -> Self {
        Self {
            family: text.font_family.clone(),
            size: text.font_size as f32,
            weight: parley::FontWeight::new(text.font_weight as f32),
            style: match text.font_style {
                FontStyle::Normal => parley::FontStyle::Normal,
                FontStyle::Italic => parley::FontStyle::Italic,
            },
        }
    }

    fn apply(&self, builder: &mut parley::RangedBuilder<'_, Brush>) {
        builder.push_default(StyleProperty::FontSize(self.size));
        builder.push_default(StyleProperty::FontWeight(self.weight));
        builder.push_default(StyleProperty::FontStyle(self.style));
        // Named family with a generic sans-serif fallback.
        builder.push_default(StyleProperty::FontFamily(parley::FontFamily::Source(
            format!("{}, sans-serif", self.family).into(),
        )));
    }
}

/// [`TextMeasure`] backed by Parley, so wrapping sees real glyph advances.
struct ParleyMeasure<'a> {
    font_cx: &'a mut FontContext,
    layout_cx: &'a mut LayoutContext<Brush>,
    spec: FontSpec,
}

impl ParleyMeasure<'_> {
    fn layout_width(&mut self, text: &str, letter_spacing: f64) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let mut builder = self.layout_cx.ranged_builder(self.font_cx, text, 1.0, false);
        self.spec.apply(&mut builder);
        if letter_spacing != 0.0 {
            builder.push_default(StyleProperty::LetterSpacing(letter_spacing as f32));
        }
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.width() as f64
    }
}

impl TextMeasure for ParleyMeasure<'_> {
    fn measure(&mut self, text: &str) -> f64 {
        self.layout_width(text, 0.0)
    }

    fn measure_with_spacing(&mut self, text: &str, spacing: f64) -> f64 {
        self.layout_width(text, spacing)
    }
}

/// Draw a single line of UI text (ruler labels, readouts) at `origin`
/// (top-left). Returns the advance width.
pub fn draw_label(
    scene: &mut Scene,
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<Brush>,
    text: &str,
    origin: Point,
    size: f32,
    color: Color,
) -> f64 {
    let spec = FontSpec {
        family: "sans-serif".to_string(),
        size,
        weight: parley::FontWeight::NORMAL,
        style: parley::FontStyle::Normal,
    };
    draw_line(
        scene,
        font_cx,
        layout_cx,
        text,
        &spec,
        0.0,
        Affine::translate(origin.to_vec2()),
        &Brush::Solid(color),
        None,
    )
}

/// Lay out one line and emit its glyph runs under `transform` (which maps
/// the line's local top-left origin to the scene). Returns the advance.
#[allow(clippy::too_many_arguments)]
fn draw_line(
    scene: &mut Scene,
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<Brush>,
    text: &str,
    spec: &FontSpec,
    letter_spacing: f64,
    transform: Affine,
    fill: &Brush,
    stroke: Option<(&Brush, f64)>,
) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let mut builder = layout_cx.ranged_builder(font_cx, text, 1.0, false);
    spec.apply(&mut builder);
    if letter_spacing != 0.0 {
        builder.push_default(StyleProperty::LetterSpacing(letter_spacing as f32));
    }
    let mut layout = builder.build(text);
    layout.break_all_lines(None);
    layout.align(
        None,
        parley::Alignment::Start,
        parley::AlignmentOptions::default(),
    );
    let advance = layout.width() as f64;

    for line in layout.lines() {
        for item in line.items() {
            let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                continue;
            };
            let mut x = glyph_run.offset();
            let y = glyph_run.baseline();
            let run = glyph_run.run();
            let font = run.font();
            let font_size = run.font_size();
            let synthesis = run.synthesis();
            let glyph_xform = synthesis
                .skew()
                .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

            let glyphs: Vec<vello::Glyph> = glyph_run
                .glyphs()
                .map(|glyph| {
                    let gx = x + glyph.x;
                    let gy = y - glyph.y;
                    x += glyph.advance;
                    vello::Glyph {
                        id: glyph.id,
                        x: gx,
                        y: gy,
                    }
                })
                .collect();
            if glyphs.is_empty() {
                continue;
            }

            scene
                .draw_glyphs(font)
                .brush(fill)
                .hint(true)
                .transform(transform)
                .glyph_transform(glyph_xform)
                .font_size(font_size)
                .normalized_coords(run.normalized_coords())
                .draw(Fill::NonZero, glyphs.iter().copied());

            if let Some((stroke_brush, width)) = stroke {
                scene
                    .draw_glyphs(font)
                    .brush(stroke_brush)
                    .hint(true)
                    .transform(transform)
                    .glyph_transform(glyph_xform)
                    .font_size(font_size)
                    .normalized_coords(run.normalized_coords())
                    .draw(&Stroke::new(width), glyphs.iter().copied());
            }
        }
    }
    advance
}

/// Draw a text object into `local` (its box in artboard pixels; `transform`
/// already carries position, rotation and the artboard-to-screen mapping).
pub fn draw_text_object(
    scene: &mut Scene,
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<Brush>,
    text: &TextObject,
    local: Rect,
    transform: Affine,
    editing: bool,
) {
    let spec = FontSpec::for_object(text);
    let placeholder = text.is_placeholder() && !editing;
    let content = if editing && text.is_placeholder() {
        // Placeholder clears the moment editing starts.
        String::new()
    } else {
        text.text.clone()
    };

    let padding = &text.padding;
    let content_box = Rect::new(
        local.x0 + padding.left,
        local.y0 + padding.top,
        (local.x1 - padding.right).max(local.x0 + padding.left),
        (local.y1 - padding.bottom).max(local.y0 + padding.top),
    );

    // Wrap, mark, then case-transform; wrap boundaries and markers are
    // computed on the untransformed string.
    let mut lines = {
        let mut measure = ParleyMeasure {
            font_cx: &mut *font_cx,
            layout_cx: &mut *layout_cx,
            spec: spec.clone(),
        };
        text_layout::layout_lines(
            &content,
            text.wrap_mode,
            content_box.width(),
            text.letter_spacing,
            &mut measure,
        )
    };
    if text.list_type != ListType::None {
        for (i, line) in lines.iter_mut().enumerate() {
            if let Some(marker) = text_layout::list_marker(text.list_type, i, &text.list_style) {
                *line = format!("{marker} {line}");
            }
        }
    }
    for line in &mut lines {
        *line = text_layout::apply_transform(line, text.text_transform);
    }

    let fill_color: Color = if placeholder {
        PLACEHOLDER_COLOR
    } else {
        text.fill.into()
    };
    let fill = Brush::Solid(fill_color);
    let stroke_brush = text.stroke.map(|c| Brush::Solid(Color::from(c)));

    if text.wrap_mode == WrapMode::Path
        && draw_text_on_path(scene, font_cx, layout_cx, &spec, text, &lines, transform, &fill)
    {
        return;
    }

    let widths: Vec<f64> = {
        let mut measure = ParleyMeasure {
            font_cx: &mut *font_cx,
            layout_cx: &mut *layout_cx,
            spec: spec.clone(),
        };
        lines
            .iter()
            .map(|line| measure.measure_with_spacing(line, text.letter_spacing))
            .collect()
    };

    // Translucent highlight behind the content while editing.
    if editing {
        scene.fill(Fill::NonZero, transform, EDIT_HIGHLIGHT, None, &local);
    }

    // Clip to the padded box so overflow never escapes the object.
    scene.push_clip_layer(Fill::NonZero, transform, &content_box);

    let advance = text.line_advance();
    let block_height = text_layout::block_height(lines.len(), advance);
    let top = match text.vertical_align {
        VerticalAlign::Top => content_box.y0,
        VerticalAlign::Middle => content_box.y0 + (content_box.height() - block_height) / 2.0,
        VerticalAlign::Bottom => content_box.y1 - block_height,
    };

    let mut caret_origin = Point::new(content_box.x0, top);
    for (i, line) in lines.iter().enumerate() {
        let y = top + i as f64 * advance;
        let width = widths[i];
        let mut x = match text.text_align {
            TextAlign::Left => content_box.x0,
            TextAlign::Center => content_box.x0 + (content_box.width() - width) / 2.0,
            TextAlign::Right => content_box.x1 - width,
        };
        if text.list_type != ListType::None && text.text_align == TextAlign::Left {
            x += text.list_style.indent_size;
        }
        draw_line(
            scene,
            font_cx,
            layout_cx,
            line,
            &spec,
            text.letter_spacing,
            transform * Affine::translate((x, y)),
            &fill,
            stroke_brush.as_ref().map(|b| (b, text.stroke_width)),
        );
        caret_origin = Point::new(x + width, y);
    }

    if editing && caret_visible(now_millis()) {
        let caret = Line::new(caret_origin, caret_origin + Vec2::new(0.0, advance));
        scene.stroke(&Stroke::new(1.5), transform, CARET_COLOR, None, &caret);
    }

    scene.pop_layer();
}

/// Place the text's characters along its path, rotated to the local
/// tangent. Returns false when the path is missing or unusable so the
/// caller can fall back to horizontal layout.
#[allow(clippy::too_many_arguments)]
fn draw_text_on_path(
    scene: &mut Scene,
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<Brush>,
    spec: &FontSpec,
    text: &TextObject,
    lines: &[String],
    transform: Affine,
    fill: &Brush,
) -> bool {
    let Some(path_data) = text.path_data.as_deref() else {
        return false;
    };
    let path = match parse_path(path_data) {
        Ok(path) => path,
        Err(err) => {
            log::warn!("text path unusable, falling back to horizontal: {err}");
            return false;
        }
    };
    let total = path_length(&path);
    if total <= f64::EPSILON {
        log::warn!("text path has zero length, falling back to horizontal");
        return false;
    }

    let content = lines.join(" ");
    let chars: Vec<char> = content.chars().collect();
    if chars.is_empty() {
        return true;
    }

    // Per-character advances; compressed uniformly when the text is longer
    // than the path.
    let advances: Vec<f64> = {
        let mut measure = ParleyMeasure {
            font_cx: &mut *font_cx,
            layout_cx: &mut *layout_cx,
            spec: spec.clone(),
        };
        let mut buf = [0u8; 4];
        chars
            .iter()
            .map(|&c| measure.measure(c.encode_utf8(&mut buf)) + text.letter_spacing)
            .collect()
    };
    let text_length: f64 = advances.iter().sum();
    let scale = if text_length > total {
        total / text_length
    } else {
        1.0
    };

    let samples = match sample_bez_path(&path, chars.len()) {
        Ok(samples) => samples,
        Err(err) => {
            log::warn!("text path sampling failed: {err}");
            return false;
        }
    };

    let mut s = 0.0;
    let mut buf = [0u8; 4];
    for (i, &c) in chars.iter().enumerate() {
        // Map cumulative advance into the evenly spaced sample grid.
        let index = ((s / total) * samples.len() as f64) as usize;
        let sample = samples[index.min(samples.len() - 1)];
        let placement = transform
            * Affine::translate(sample.point.to_vec2())
            * Affine::rotate(sample.tangent_angle);
        draw_line(
            scene,
            font_cx,
            layout_cx,
            c.encode_utf8(&mut buf),
            spec,
            0.0,
            placement,
            fill,
            None,
        );
        s += advances[i] * scale;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_blink_phase() {
        assert!(caret_visible(0));
        assert!(caret_visible(499));
        assert!(!caret_visible(500));
        assert!(!caret_visible(999));
        assert!(caret_visible(1000));
    }
}
