//! Text object.

use super::{ObjectCommon, SerializableColor};
use serde::{Deserialize, Serialize};

/// Placeholder content for freshly created text objects; drawn faded
/// until the user starts editing.
pub const PLACEHOLDER_TEXT: &str = "Type here...";

/// How text flows inside (or outside) its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// No wrapping; lines may overflow visually.
    None,
    /// Greedy word wrap inside the padded content box.
    #[default]
    Area,
    /// Glyphs distributed along `path_data`; falls back to horizontal
    /// layout when the path cannot be sampled.
    Path,
}

/// Horizontal line alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical block alignment inside the content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Case transform applied to wrapped, marker-prefixed lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

/// List marker style for multi-line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    None,
    Bullet,
    Number,
    Letter,
    Roman,
}

/// Separator drawn after a numbered/lettered marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSeparator {
    /// `1.`, `a.`, `iv.`
    #[default]
    Dot,
    /// `1)`, `a)`, `iv)`
    Paren,
}

impl MarkerSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerSeparator::Dot => ".",
            MarkerSeparator::Paren => ")",
        }
    }
}

/// List formatting details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListStyle {
    pub bullet_char: char,
    pub number_format: MarkerSeparator,
    /// Indent of marked lines, in artboard pixels at 100% zoom.
    pub indent_size: f64,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            bullet_char: '\u{2022}',
            number_format: MarkerSeparator::Dot,
            indent_size: 20.0,
        }
    }
}

/// Inner padding of the text content box, in artboard pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// A text object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(flatten)]
    pub common: ObjectCommon,
    /// Raw content; may contain newlines.
    pub text: String,
    pub font_family: String,
    /// Font size in artboard pixels.
    pub font_size: f64,
    pub font_weight: u16,
    pub font_style: FontStyle,
    /// Line height multiplier.
    pub line_height: f64,
    /// Extra advance between characters, in artboard pixels.
    pub letter_spacing: f64,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub text_transform: TextTransform,
    pub padding: Padding,
    pub wrap_mode: WrapMode,
    /// SVG path data, used only when `wrap_mode == Path`.
    pub path_data: Option<String>,
    pub list_type: ListType,
    pub list_style: ListStyle,
    pub fill: SerializableColor,
    /// Optional outline drawn on top of the fill.
    pub stroke: Option<SerializableColor>,
    pub stroke_width: f64,
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl TextObject {
    /// Create a text object at the given document-unit rectangle.
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            common: ObjectCommon::new(x, y, width, height),
            text: text.into(),
            font_family: "Inter".to_string(),
            font_size: 16.0,
            font_weight: 400,
            font_style: FontStyle::default(),
            line_height: 1.2,
            letter_spacing: 0.0,
            text_align: TextAlign::default(),
            vertical_align: VerticalAlign::default(),
            text_transform: TextTransform::default(),
            padding: Padding::default(),
            wrap_mode: WrapMode::default(),
            path_data: None,
            list_type: ListType::default(),
            list_style: ListStyle::default(),
            fill: SerializableColor::black(),
            stroke: None,
            stroke_width: 1.0,
        }
    }

    /// Whether the content is the untouched placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.text == PLACEHOLDER_TEXT
    }

    /// Line advance in artboard pixels.
    pub fn line_advance(&self) -> f64 {
        self.font_size * self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_detection() {
        let mut text = TextObject::new(PLACEHOLDER_TEXT, 0.0, 0.0, 1.0, 1.0);
        assert!(text.is_placeholder());
        text.text = "Hello".to_string();
        assert!(!text.is_placeholder());
    }

    #[test]
    fn test_line_advance() {
        let mut text = TextObject::new("x", 0.0, 0.0, 1.0, 1.0);
        text.font_size = 40.0;
        text.line_height = 1.5;
        assert!((text.line_advance() - 60.0).abs() < f64::EPSILON);
    }
}
