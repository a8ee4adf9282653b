//! Document settings and the derived artboard geometry.

use serde::{Deserialize, Serialize};

/// Bleed margin in inches (printed but trimmed away).
pub const BLEED_INCHES: f64 = 0.125;

/// Side length of the square workspace surrounding the artboard, in pixels.
pub const WORKSPACE_SIZE: f64 = 100_000.0;

/// Thickness of the on-screen rulers, in screen pixels.
pub const RULER_SIZE: f64 = 40.0;

/// Measurement unit for document dimensions and ruler labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Px,
    In,
    Mm,
    Cm,
    Ft,
}

impl Unit {
    /// Number of pixels per one of this unit at the given DPI.
    pub fn pixels_per_unit(&self, dpi: f64) -> f64 {
        match self {
            Unit::Px => 1.0,
            Unit::In => dpi,
            Unit::Mm => dpi / 25.4,
            Unit::Cm => dpi / 2.54,
            Unit::Ft => dpi * 12.0,
        }
    }

    /// Short label used on ruler ticks.
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::In => "\"",
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::Ft => "'",
        }
    }

    /// Base ruler tick interval in this unit.
    pub fn base_tick_interval(&self) -> f64 {
        match self {
            Unit::Px => 100.0,
            Unit::Mm => 10.0,
            Unit::In | Unit::Cm | Unit::Ft => 1.0,
        }
    }
}

/// Convert a value in `unit` to pixels at `dpi`.
pub fn convert_to_pixels(value: f64, unit: Unit, dpi: f64) -> f64 {
    value * unit.pixels_per_unit(dpi)
}

/// Convert a value between two units, passing through canonical pixels.
pub fn convert_to_unit(value: f64, from: Unit, to: Unit, dpi: f64) -> f64 {
    let base_pixels = value * from.pixels_per_unit(dpi);
    base_pixels / to.pixels_per_unit(dpi)
}

/// Round a value for the ruler cursor readout.
pub fn format_unit_value(value: f64) -> f64 {
    value.round()
}

/// Physical document settings. Owned by the external store; the rendering
/// core reads an immutable copy each pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Width in `unit`.
    pub width: f64,
    /// Height in `unit`.
    pub height: f64,
    /// Raster resolution, pixels per inch.
    pub dpi: f64,
    /// Measurement unit for width/height and rulers.
    pub unit: Unit,
}

impl Default for Document {
    fn default() -> Self {
        // 6x4 inch postcard at print resolution.
        Self {
            width: 6.0,
            height: 4.0,
            dpi: 300.0,
            unit: Unit::In,
        }
    }
}

impl Document {
    /// Derive the artboard geometry for this document.
    pub fn artboard(&self) -> Artboard {
        Artboard {
            width: convert_to_pixels(self.width, self.unit, self.dpi),
            height: convert_to_pixels(self.height, self.unit, self.dpi),
            bleed: BLEED_INCHES * self.dpi,
        }
    }
}

/// Fixed print area in artboard pixels, derived from the document.
///
/// The trim boundary is the artboard rectangle itself; the bleed margin
/// extends `bleed` pixels outward on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Artboard {
    pub width: f64,
    pub height: f64,
    pub bleed: f64,
}

impl Artboard {
    /// Bleed rectangle (trim inflated by the bleed margin) with the trim
    /// origin at (0, 0).
    pub fn bleed_rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            -self.bleed,
            -self.bleed,
            self.width + self.bleed,
            self.height + self.bleed,
        )
    }

    /// Trim rectangle (final cut line) with origin at (0, 0).
    pub fn trim_rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(0.0, 0.0, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_per_unit() {
        assert!((Unit::In.pixels_per_unit(300.0) - 300.0).abs() < f64::EPSILON);
        assert!((Unit::Mm.pixels_per_unit(300.0) - 300.0 / 25.4).abs() < f64::EPSILON);
        assert!((Unit::Cm.pixels_per_unit(300.0) - 300.0 / 2.54).abs() < f64::EPSILON);
        assert!((Unit::Ft.pixels_per_unit(300.0) - 3600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unit_conversion_closure() {
        let units = [Unit::Px, Unit::In, Unit::Mm, Unit::Cm, Unit::Ft];
        let values = [0.0, 1.0, 2.5, 123.456, -7.0];
        for &from in &units {
            for &to in &units {
                for &v in &values {
                    let there = convert_to_unit(v, from, to, 300.0);
                    let back = convert_to_unit(there, to, from, 300.0);
                    assert!(
                        (back - v).abs() < 1e-9,
                        "round trip {from:?}->{to:?} lost precision: {v} -> {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_inch_to_mm() {
        let mm = convert_to_unit(1.0, Unit::In, Unit::Mm, 300.0);
        assert!((mm - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_default_artboard() {
        let artboard = Document::default().artboard();
        assert!((artboard.width - 1800.0).abs() < f64::EPSILON);
        assert!((artboard.height - 1200.0).abs() < f64::EPSILON);
        assert!((artboard.bleed - 37.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bleed_rect_inflates_trim() {
        let artboard = Document::default().artboard();
        let bleed = artboard.bleed_rect();
        let trim = artboard.trim_rect();
        assert!((bleed.width() - (trim.width() + 75.0)).abs() < f64::EPSILON);
        assert!((bleed.x0 + 37.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_document_serde_round_trip() {
        let doc = Document {
            width: 210.0,
            height: 297.0,
            dpi: 150.0,
            unit: Unit::Mm,
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }
}
