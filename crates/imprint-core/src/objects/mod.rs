//! Design object definitions for the artboard.

pub mod path;
pub mod shape;
pub mod text;

pub use path::PathObject;
pub use shape::{ShapeKind, ShapeObject};
pub use text::{
    FontStyle, ListStyle, ListType, MarkerSeparator, Padding, TextAlign, TextObject,
    TextTransform, VerticalAlign, WrapMode,
};

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for design objects.
pub type ObjectId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Neutral gray used wherever a color string fails to parse.
    pub fn neutral() -> Self {
        Self::new(128, 128, 128, 255)
    }

    /// Parse a `#rgb`, `#rrggbb` or `#rrggbbaa` hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    channels[i] = v * 16 + v;
                }
                Some(Self::new(channels[0], channels[1], channels[2], 255))
            }
            6 | 8 => {
                let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Self::new(
                    byte(0)?,
                    byte(2)?,
                    byte(4)?,
                    if digits.len() == 8 { byte(6)? } else { 255 },
                ))
            }
            _ => None,
        }
    }

    /// Parse a hex string, falling back to neutral gray instead of failing.
    pub fn from_hex_or_neutral(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or_else(|| {
            log::warn!("invalid color string {hex:?}, using neutral fallback");
            Self::neutral()
        })
    }

    /// This color with its alpha scaled by `opacity` (0-1).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let alpha = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Compositing operator applied while an object is drawn, reset afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

/// Drop shadow effect parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropShadow {
    pub color: SerializableColor,
    pub opacity: f64,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Outer glow effect parameters (always zero offset).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OuterGlow {
    pub color: SerializableColor,
    pub opacity: f64,
    pub blur: f64,
}

/// Optional visual effects. At most one is rendered; drop shadow wins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerEffects {
    pub drop_shadow: Option<DropShadow>,
    pub outer_glow: Option<OuterGlow>,
}

/// Attributes shared by every design object.
///
/// Position and size are in document units; `rotation` is in degrees and
/// normalized modulo 360 on access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCommon {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub opacity: f64,
    pub blend_mode: BlendMode,
    #[serde(default)]
    pub effects: LayerEffects,
    pub visible: bool,
    pub locked: bool,
    pub z_index: i32,
}

impl ObjectCommon {
    /// Create common attributes at the given document-unit rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
            rotation: 0.0,
            opacity: 1.0,
            blend_mode: BlendMode::default(),
            effects: LayerEffects::default(),
            visible: true,
            locked: false,
            z_index: 0,
        }
    }

    /// Rotation normalized to [0, 360).
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.rem_euclid(360.0)
    }

    /// Bounding rectangle in document units (ignoring rotation).
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Center point in document units.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Enum wrapper over all object variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DesignObject {
    Text(TextObject),
    Shape(ShapeObject),
    Path(PathObject),
}

impl DesignObject {
    pub fn common(&self) -> &ObjectCommon {
        match self {
            DesignObject::Text(o) => &o.common,
            DesignObject::Shape(o) => &o.common,
            DesignObject::Path(o) => &o.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut ObjectCommon {
        match self {
            DesignObject::Text(o) => &mut o.common,
            DesignObject::Shape(o) => &mut o.common,
            DesignObject::Path(o) => &mut o.common,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.common().id
    }

    pub fn bounds(&self) -> Rect {
        self.common().bounds()
    }
}

/// Order object indices by ascending z-index, preserving insertion order
/// between equal z-indices.
pub fn draw_order(objects: &[DesignObject]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..objects.len()).collect();
    order.sort_by_key(|&i| objects[i].common().z_index);
    order
}
