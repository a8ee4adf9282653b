//! Text measurement and wrapping.
//!
//! The same engine runs at draw time and at bounding-box measurement time;
//! measurement is abstracted behind [`TextMeasure`] so both callers share
//! the exact font/size/spacing state and cannot diverge.

use crate::objects::{ListStyle, ListType, TextTransform, WrapMode};

/// Measures text width for the font state currently in effect.
///
/// Implementations must use the same font, size and style that the
/// eventual draw call uses.
pub trait TextMeasure {
    /// Width of `text` in artboard pixels, without letter spacing.
    fn measure(&mut self, text: &str) -> f64;

    /// Width of `text` including per-character letter spacing.
    ///
    /// With positive spacing each character is measured individually and
    /// `spacing` is added between consecutive characters, matching the
    /// character-by-character placement used at draw time.
    fn measure_with_spacing(&mut self, text: &str, spacing: f64) -> f64 {
        if spacing <= 0.0 {
            return self.measure(text);
        }
        let mut width = 0.0;
        let mut count = 0usize;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            width += self.measure(ch.encode_utf8(&mut buf));
            count += 1;
        }
        if count > 1 {
            width += spacing * (count - 1) as f64;
        }
        width
    }
}

/// Fixed-advance measurement, used by tests and as a degenerate fallback.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    /// Advance per character in artboard pixels.
    pub advance: f64,
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance
    }
}

/// Greedy word wrap of a single source line into `max_width`.
///
/// Words are accumulated while the measured width (including letter
/// spacing) stays within `max_width`; a word that alone exceeds the box
/// is broken character by character. Always returns at least one line,
/// and never drops characters.
pub fn wrap(
    text: &str,
    max_width: f64,
    letter_spacing: f64,
    measure: &mut dyn TextMeasure,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        let candidate_width = measure.measure_with_spacing(&candidate, letter_spacing);

        if candidate_width <= max_width && !current.is_empty() {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        let word_width = measure.measure_with_spacing(word, letter_spacing);
        if word_width > max_width {
            current = break_word(word, max_width, letter_spacing, measure, &mut lines);
        } else {
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Character-level fallback for a word wider than the box. Returns the
/// trailing partial line.
fn break_word(
    word: &str,
    max_width: f64,
    letter_spacing: f64,
    measure: &mut dyn TextMeasure,
    lines: &mut Vec<String>,
) -> String {
    let mut line = String::new();
    for ch in word.chars() {
        let mut candidate = line.clone();
        candidate.push(ch);
        let width = measure.measure_with_spacing(&candidate, letter_spacing);
        if width <= max_width || line.is_empty() {
            // A lone character wider than the box is still emitted; lines
            // may not lose characters.
            line = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push(ch);
        }
    }
    line
}

/// Wrap raw content (which may contain newlines) according to the wrap
/// mode. `None` and `Path` keep source lines intact; `Path` glyph
/// placement happens later in the renderer.
pub fn layout_lines(
    text: &str,
    wrap_mode: WrapMode,
    max_width: f64,
    letter_spacing: f64,
    measure: &mut dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    for source_line in text.split('\n') {
        match wrap_mode {
            WrapMode::Area => lines.extend(wrap(source_line, max_width, letter_spacing, measure)),
            WrapMode::None | WrapMode::Path => lines.push(source_line.to_string()),
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Lowercase Roman numeral in standard subtractive notation.
pub fn to_roman(mut num: u32) -> String {
    const VALUES: [(u32, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut result = String::new();
    for (value, symbol) in VALUES {
        while num >= value {
            result.push_str(symbol);
            num -= value;
        }
    }
    result
}

/// Lowercase letter label: `a..z`, continuing spreadsheet-style with
/// `aa, ab, ...` past the 26th line.
pub fn to_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut buf = Vec::new();
    while n > 0 {
        n -= 1;
        buf.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

/// Marker text for a list line, including the trailing separator, or
/// `None` when the list type is `None`.
pub fn list_marker(list_type: ListType, index: usize, style: &ListStyle) -> Option<String> {
    let separator = style.number_format.as_str();
    match list_type {
        ListType::None => None,
        ListType::Bullet => Some(style.bullet_char.to_string()),
        ListType::Number => Some(format!("{}{}", index + 1, separator)),
        ListType::Letter => Some(format!("{}{}", to_letter(index), separator)),
        ListType::Roman => Some(format!("{}{}", to_roman(index as u32 + 1), separator)),
    }
}

/// Apply a case transform to an already-wrapped, already-marked line.
/// Wrap boundaries are computed on the pre-transform string.
pub fn apply_transform(line: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => line.to_string(),
        TextTransform::Uppercase => line.to_uppercase(),
        TextTransform::Lowercase => line.to_lowercase(),
        TextTransform::Capitalize => {
            let mut result = String::with_capacity(line.len());
            let mut at_word_start = true;
            for ch in line.chars() {
                if at_word_start && ch.is_alphanumeric() {
                    result.extend(ch.to_uppercase());
                } else {
                    result.push(ch);
                }
                at_word_start = !ch.is_alphanumeric();
            }
            result
        }
    }
}

/// Height of a wrapped text block in artboard pixels: line count times
/// line advance. Shared by the drawer and any height-measurement caller.
pub fn block_height(line_count: usize, line_advance: f64) -> f64 {
    line_count.max(1) as f64 * line_advance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::MarkerSeparator;

    fn mono(advance: f64) -> MonospaceMeasure {
        MonospaceMeasure { advance }
    }

    #[test]
    fn test_wrap_one_word_per_line() {
        // Box fits exactly one 4-char word (40px) but not two plus a space.
        let lines = wrap("aaaa bbbb cccc", 40.0, 0.0, &mut mono(10.0));
        assert_eq!(lines, vec!["aaaa", "bbbb", "cccc"]);
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        let lines = wrap("aa bb", 100.0, 0.0, &mut mono(10.0));
        assert_eq!(lines, vec!["aa bb"]);
    }

    #[test]
    fn test_wrap_box_narrower_than_character() {
        let lines = wrap("abc", 5.0, 0.0, &mut mono(10.0));
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| !l.is_empty()));
        // No characters may be lost across lines.
        assert_eq!(lines.concat(), "abc");
    }

    #[test]
    fn test_wrap_long_word_breaks_to_characters() {
        let lines = wrap("abcdef gh", 30.0, 0.0, &mut mono(10.0));
        assert_eq!(lines, vec!["abc", "def", "gh"]);
        assert_eq!(lines.concat(), "abcdefgh");
    }

    #[test]
    fn test_wrap_empty_returns_one_empty_line() {
        let lines = wrap("", 100.0, 0.0, &mut mono(10.0));
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn test_letter_spacing_affects_wrap() {
        // "ab cd" is 5 chars = 50px plain, but with 30px spacing each pair
        // alone is 10+30+10 = 50px, so the words split.
        let mut measure = mono(10.0);
        assert_eq!(wrap("ab cd", 50.0, 0.0, &mut measure), vec!["ab cd"]);
        assert_eq!(wrap("ab cd", 50.0, 30.0, &mut measure), vec!["ab", "cd"]);
    }

    #[test]
    fn test_measure_with_spacing() {
        let mut measure = mono(10.0);
        assert!((measure.measure_with_spacing("abc", 0.0) - 30.0).abs() < f64::EPSILON);
        assert!((measure.measure_with_spacing("abc", 5.0) - 40.0).abs() < f64::EPSILON);
        assert!((measure.measure_with_spacing("a", 5.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hello_world_in_100px_box_at_40px_font() {
        // Scenario from the print workflow: "Hello World" at 40px font in
        // a 100px box must wrap into exactly two lines. 0.45em is a
        // reasonable average advance for a proportional face.
        let mut measure = mono(40.0 * 0.45);
        let lines = wrap("Hello World", 100.0, 0.0, &mut measure);
        assert_eq!(lines, vec!["Hello", "World"]);
    }

    #[test]
    fn test_layout_lines_preserves_newlines() {
        let lines = layout_lines("aa\nbb", WrapMode::Area, 100.0, 0.0, &mut mono(10.0));
        assert_eq!(lines, vec!["aa", "bb"]);
    }

    #[test]
    fn test_layout_lines_none_mode_overflows() {
        let lines = layout_lines(
            "a very long line that overflows",
            WrapMode::None,
            10.0,
            0.0,
            &mut mono(10.0),
        );
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_roman_numerals() {
        assert_eq!(to_roman(1), "i");
        assert_eq!(to_roman(4), "iv");
        assert_eq!(to_roman(9), "ix");
        assert_eq!(to_roman(14), "xiv");
        assert_eq!(to_roman(40), "xl");
        assert_eq!(to_roman(1994), "mcmxciv");
    }

    #[test]
    fn test_letter_labels_continue_past_z() {
        assert_eq!(to_letter(0), "a");
        assert_eq!(to_letter(25), "z");
        assert_eq!(to_letter(26), "aa");
        assert_eq!(to_letter(27), "ab");
        assert_eq!(to_letter(52), "ba");
        assert_eq!(to_letter(701), "zz");
        assert_eq!(to_letter(702), "aaa");
    }

    #[test]
    fn test_list_markers() {
        let style = ListStyle::default();
        assert_eq!(list_marker(ListType::None, 0, &style), None);
        assert_eq!(
            list_marker(ListType::Bullet, 3, &style),
            Some("\u{2022}".to_string())
        );
        assert_eq!(list_marker(ListType::Number, 0, &style), Some("1.".to_string()));
        assert_eq!(list_marker(ListType::Letter, 1, &style), Some("b.".to_string()));
        assert_eq!(list_marker(ListType::Roman, 3, &style), Some("iv.".to_string()));

        let paren = ListStyle {
            number_format: MarkerSeparator::Paren,
            ..ListStyle::default()
        };
        assert_eq!(list_marker(ListType::Number, 1, &paren), Some("2)".to_string()));
    }

    #[test]
    fn test_transforms() {
        assert_eq!(apply_transform("a b", TextTransform::None), "a b");
        assert_eq!(apply_transform("a b", TextTransform::Uppercase), "A B");
        assert_eq!(apply_transform("A B", TextTransform::Lowercase), "a b");
        assert_eq!(
            apply_transform("hello world", TextTransform::Capitalize),
            "Hello World"
        );
        assert_eq!(
            apply_transform("1. bullet point", TextTransform::Capitalize),
            "1. Bullet Point"
        );
    }

    #[test]
    fn test_block_height() {
        assert!((block_height(3, 48.0) - 144.0).abs() < f64::EPSILON);
        assert!((block_height(0, 48.0) - 48.0).abs() < f64::EPSILON);
    }
}
