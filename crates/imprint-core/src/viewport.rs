//! Viewport state and the document/screen coordinate transform.

use crate::document::Document;
use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom used in any divide; zoom at or below zero is clamped here.
pub const MIN_EFFECTIVE_ZOOM: f64 = 1e-4;

/// User-controlled pan/zoom state. Mutated only by the input layer; the
/// rendering core reads it as part of the frame snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Zoom level, 1.0 = 100% in the UI.
    pub zoom: f64,
    /// Pan offset in screen pixels.
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(zoom: f64, pan_x: f64, pan_y: f64) -> Self {
        Self { zoom, pan_x, pan_y }
    }

    pub fn pan(&self) -> Vec2 {
        Vec2::new(self.pan_x, self.pan_y)
    }
}

/// Per-frame transform between the four coordinate frames:
/// document units -> artboard pixels -> screen pixels, and back.
///
/// The artboard is centered on the canvas, offset by the pan, and scaled by
/// `zoom * view_scale` about its own midpoint. Built once per render pass
/// and shared by drawing and hit-testing so both sides see identical math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    /// Pixels per document unit.
    units_to_px: f64,
    /// Combined zoom (`viewport.zoom * view_scale`), clamped positive.
    effective_zoom: f64,
    /// Screen-space transform applied to artboard-pixel coordinates.
    artboard_to_screen: Affine,
}

impl CanvasTransform {
    /// Build the frame transform.
    ///
    /// `view_scale` is the default fit scale applied on top of the user
    /// zoom (so zoom 1.0 shows the artboard at a comfortable size).
    pub fn new(document: &Document, viewport: &Viewport, canvas_size: Size, view_scale: f64) -> Self {
        let artboard = document.artboard();
        let effective_zoom = (viewport.zoom * view_scale).max(MIN_EFFECTIVE_ZOOM);

        // The zoom transform is centered on the artboard midpoint, which
        // sits at the canvas center plus the pan offset.
        let canvas_center = Point::new(canvas_size.width / 2.0, canvas_size.height / 2.0);
        let artboard_center_screen = canvas_center + viewport.pan();
        let artboard_center = Point::new(artboard.width / 2.0, artboard.height / 2.0);

        let artboard_to_screen = Affine::translate(artboard_center_screen.to_vec2())
            * Affine::scale(effective_zoom)
            * Affine::translate(-artboard_center.to_vec2());

        Self {
            units_to_px: document.unit.pixels_per_unit(document.dpi),
            effective_zoom,
            artboard_to_screen,
        }
    }

    /// Combined zoom, always positive.
    pub fn effective_zoom(&self) -> f64 {
        self.effective_zoom
    }

    /// The affine mapping artboard pixels to screen pixels.
    pub fn artboard_to_screen(&self) -> Affine {
        self.artboard_to_screen
    }

    /// The inverse affine, mapping screen pixels to artboard pixels.
    pub fn screen_to_artboard(&self) -> Affine {
        self.artboard_to_screen.inverse()
    }

    /// Convert a point in document units to artboard pixels.
    pub fn document_to_artboard(&self, p: Point) -> Point {
        Point::new(p.x * self.units_to_px, p.y * self.units_to_px)
    }

    /// Convert a point in artboard pixels to document units.
    pub fn artboard_to_document(&self, p: Point) -> Point {
        Point::new(p.x / self.units_to_px, p.y / self.units_to_px)
    }

    /// Convert a point in document units to screen pixels.
    pub fn to_screen(&self, document_point: Point) -> Point {
        self.artboard_to_screen * self.document_to_artboard(document_point)
    }

    /// Exact inverse of [`to_screen`](Self::to_screen), up to floating
    /// point rounding.
    pub fn to_document(&self, screen_point: Point) -> Point {
        self.artboard_to_document(self.screen_to_artboard() * screen_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Unit;

    fn transform(zoom: f64, pan_x: f64, pan_y: f64) -> CanvasTransform {
        let document = Document::default();
        let viewport = Viewport::new(zoom, pan_x, pan_y);
        CanvasTransform::new(&document, &viewport, Size::new(1600.0, 900.0), 0.25)
    }

    #[test]
    fn test_round_trip() {
        let zooms = [0.1, 1.0, 5.0, 25.0];
        let pans = [(0.0, 0.0), (123.0, -45.0)];
        let points = [
            Point::ZERO,
            Point::new(3.0, 2.0),
            Point::new(-1.25, 7.5),
            Point::new(1e3, -1e3),
        ];
        for &zoom in &zooms {
            for &(px, py) in &pans {
                let t = transform(zoom, px, py);
                for &p in &points {
                    let back = t.to_document(t.to_screen(p));
                    assert!(
                        (back.x - p.x).abs() < 1e-6 && (back.y - p.y).abs() < 1e-6,
                        "round trip failed at zoom {zoom}: {p:?} -> {back:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_artboard_center_maps_to_canvas_center_plus_pan() {
        let t = transform(2.0, 40.0, -25.0);
        // Artboard center in document units (6x4in doc).
        let screen = t.to_screen(Point::new(3.0, 2.0));
        assert!((screen.x - (800.0 + 40.0)).abs() < 1e-9);
        assert!((screen.y - (450.0 - 25.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_scales_about_artboard_center() {
        let t1 = transform(1.0, 0.0, 0.0);
        let t2 = transform(2.0, 0.0, 0.0);
        let center = Point::new(3.0, 2.0);
        let off_center = Point::new(4.0, 2.0);

        let c1 = t1.to_screen(center);
        let c2 = t2.to_screen(center);
        assert!((c1.x - c2.x).abs() < 1e-9 && (c1.y - c2.y).abs() < 1e-9);

        let d1 = t1.to_screen(off_center).x - c1.x;
        let d2 = t2.to_screen(off_center).x - c2.x;
        assert!((d2 - d1 * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_zoom_is_clamped() {
        let t = transform(0.0, 0.0, 0.0);
        assert!(t.effective_zoom() >= MIN_EFFECTIVE_ZOOM);
        // Inverse must still be finite.
        let p = t.to_document(Point::new(100.0, 100.0));
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn test_document_units_respected() {
        let document = Document {
            width: 100.0,
            height: 100.0,
            dpi: 300.0,
            unit: Unit::Px,
        };
        let t = CanvasTransform::new(
            &document,
            &Viewport::default(),
            Size::new(800.0, 600.0),
            1.0,
        );
        // For px documents a document unit is one artboard pixel.
        let a = t.document_to_artboard(Point::new(50.0, 25.0));
        assert!((a.x - 50.0).abs() < f64::EPSILON);
        assert!((a.y - 25.0).abs() < f64::EPSILON);
    }
}
