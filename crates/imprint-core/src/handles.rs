//! Zoom-compensated sizing for transform handles and selection chrome.
//!
//! Handles are drawn in world (artboard) space but must keep a roughly
//! constant screen-space size: world sizes are `screen_size / zoom`,
//! clamped so they neither collapse at extreme zoom-in nor balloon at
//! extreme zoom-out.

use serde::{Deserialize, Serialize};

const HANDLE_BASE_SCREEN_SIZE: f64 = 14.0;
const HANDLE_HOVER_SCALE: f64 = 1.28;
const HANDLE_MIN_WORLD_SIZE: f64 = 8.0;
const HANDLE_MAX_WORLD_SIZE: f64 = 140.0;
const HANDLE_LINE_WIDTH_MIN: f64 = 1.4;
const HANDLE_LINE_WIDTH_MAX: f64 = 2.4;
const HANDLE_BORDER_PADDING_SCREEN: f64 = 9.0;
const HANDLE_BORDER_EXTRA_SCREEN: f64 = 2.5;
const TEXT_EXTRA_PADDING_SCREEN: f64 = 4.0;
const HANDLE_HIT_TARGET_SCREEN: f64 = 22.0;
const ROTATION_HANDLE_OFFSET_MULTIPLIER: f64 = 2.5;
const ROTATION_HANDLE_RADIUS_MULTIPLIER: f64 = 1.12;

/// Smallest zoom considered for handle sizing.
const MIN_ZOOM: f64 = 0.01;

/// Identifier for the interactive transform handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleId {
    Nw,
    Ne,
    Se,
    Sw,
    N,
    E,
    S,
    W,
    Rotate,
}

impl HandleId {
    /// The four corner handles.
    pub const CORNERS: [HandleId; 4] = [HandleId::Nw, HandleId::Ne, HandleId::Se, HandleId::Sw];

    /// The four edge-midpoint handles.
    pub const EDGES: [HandleId; 4] = [HandleId::N, HandleId::E, HandleId::S, HandleId::W];

    pub fn is_edge(&self) -> bool {
        matches!(self, HandleId::N | HandleId::E | HandleId::S | HandleId::W)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HandleId::Nw => "nw",
            HandleId::Ne => "ne",
            HandleId::Se => "se",
            HandleId::Sw => "sw",
            HandleId::N => "n",
            HandleId::E => "e",
            HandleId::S => "s",
            HandleId::W => "w",
            HandleId::Rotate => "rotate",
        }
    }
}

/// All handle metrics for one zoom level, in world units unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMetrics {
    /// Handle diameter.
    pub size: f64,
    /// Handle radius.
    pub radius: f64,
    /// Radius of a hovered handle.
    pub hover_radius: f64,
    /// Stroke width for handle outlines.
    pub line_width: f64,
    /// Offset of the rotation handle above the top edge.
    pub rotation_offset: f64,
    /// Rotation handle radius.
    pub rotation_radius: f64,
    /// Rotation handle radius when hovered.
    pub rotation_radius_hovered: f64,
    /// Cursor hit slop around handles and borders.
    pub hit_radius: f64,
    /// Selection outline expansion around the object bounds.
    pub selection_padding: f64,
    /// Extra expansion for the stroked selection border.
    pub selection_stroke_padding: f64,
    /// Additional padding applied to text objects.
    pub text_extra_padding: f64,
}

impl HandleMetrics {
    /// Compute metrics for a zoom level (clamped at 0.01).
    pub fn for_zoom(zoom: f64) -> Self {
        let zoom = zoom.max(MIN_ZOOM);

        let size = (HANDLE_BASE_SCREEN_SIZE / zoom)
            .clamp(HANDLE_MIN_WORLD_SIZE, HANDLE_MAX_WORLD_SIZE);
        let radius = size / 2.0;
        let line_width =
            (HANDLE_LINE_WIDTH_MAX / zoom).clamp(HANDLE_LINE_WIDTH_MIN, HANDLE_LINE_WIDTH_MAX);
        let rotation_radius = radius * ROTATION_HANDLE_RADIUS_MULTIPLIER;

        Self {
            size,
            radius,
            hover_radius: radius * HANDLE_HOVER_SCALE,
            line_width,
            rotation_offset: size * ROTATION_HANDLE_OFFSET_MULTIPLIER,
            rotation_radius,
            rotation_radius_hovered: rotation_radius * HANDLE_HOVER_SCALE,
            hit_radius: HANDLE_HIT_TARGET_SCREEN / zoom,
            selection_padding: radius + HANDLE_BORDER_PADDING_SCREEN / zoom,
            selection_stroke_padding: HANDLE_BORDER_EXTRA_SCREEN / zoom,
            text_extra_padding: TEXT_EXTRA_PADDING_SCREEN / zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_non_increasing_in_world_units() {
        let mut previous = f64::INFINITY;
        for i in 0..200 {
            let zoom = 0.01 * 1.05_f64.powi(i);
            let metrics = HandleMetrics::for_zoom(zoom);
            assert!(
                metrics.radius <= previous + 1e-9,
                "radius grew at zoom {zoom}"
            );
            previous = metrics.radius;
        }
    }

    #[test]
    fn test_screen_size_stays_in_band() {
        // Screen-space diameter must stay within the clamp band across the
        // whole supported zoom range.
        for i in 0..=400 {
            let zoom = 0.01 * (100.0f64 / 0.01).powf(i as f64 / 400.0);
            let metrics = HandleMetrics::for_zoom(zoom);
            let screen_size = metrics.size * zoom;
            assert!(
                screen_size <= HANDLE_MAX_WORLD_SIZE * zoom + 1e-9,
                "zoom {zoom}"
            );
            // Within the unclamped band the screen size is exactly the base.
            if (HANDLE_BASE_SCREEN_SIZE / zoom) > HANDLE_MIN_WORLD_SIZE
                && (HANDLE_BASE_SCREEN_SIZE / zoom) < HANDLE_MAX_WORLD_SIZE
            {
                assert!((screen_size - HANDLE_BASE_SCREEN_SIZE).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_world_size_clamped() {
        // Extreme zoom-in: world size bottoms out at the minimum.
        let zoomed_in = HandleMetrics::for_zoom(100.0);
        assert!((zoomed_in.size - HANDLE_MIN_WORLD_SIZE).abs() < f64::EPSILON);

        // Extreme zoom-out: world size tops out at the maximum.
        let zoomed_out = HandleMetrics::for_zoom(0.01);
        assert!((zoomed_out.size - HANDLE_MAX_WORLD_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_zoom_clamped() {
        let metrics = HandleMetrics::for_zoom(0.0);
        assert!(metrics.size.is_finite());
        assert!(metrics.hit_radius.is_finite());
    }

    #[test]
    fn test_hover_radius_larger() {
        let metrics = HandleMetrics::for_zoom(1.0);
        assert!(metrics.hover_radius > metrics.radius);
        assert!(metrics.rotation_radius_hovered > metrics.rotation_radius);
    }

    #[test]
    fn test_handle_id_strings() {
        assert_eq!(HandleId::Nw.as_str(), "nw");
        assert_eq!(HandleId::Rotate.as_str(), "rotate");
        assert!(HandleId::N.is_edge());
        assert!(!HandleId::Se.is_edge());
    }
}
