//! Pure geometric path sampling for text-on-path layout.
//!
//! Parses SVG path data with kurbo and produces evenly spaced
//! point-plus-tangent samples along the combined arc length, so the
//! renderer can place one glyph per sample and rotate it to follow the
//! local tangent. No DOM or renderer involvement; errors are typed so
//! callers can fall back to horizontal layout.

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathSeg, Point};
use thiserror::Error;

/// Arc-length accuracy used for all measurements.
const ARCLEN_ACCURACY: f64 = 1e-4;

/// Path sampling errors.
#[derive(Debug, Error)]
pub enum PathSampleError {
    #[error("invalid path data: {0}")]
    Parse(String),
    #[error("path has no drawable segments")]
    Empty,
    #[error("path has zero length")]
    ZeroLength,
}

/// A single sample along a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Position on the path.
    pub point: Point,
    /// Tangent direction at the position, in radians.
    pub tangent_angle: f64,
}

/// Parse SVG path data into a [`BezPath`].
pub fn parse_path(data: &str) -> Result<BezPath, PathSampleError> {
    let path = BezPath::from_svg(data).map_err(|e| PathSampleError::Parse(e.to_string()))?;
    if path.segments().next().is_none() {
        return Err(PathSampleError::Empty);
    }
    Ok(path)
}

/// Total arc length of a path.
pub fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|seg| seg.arclen(ARCLEN_ACCURACY)).sum()
}

/// Evaluate the point at arc-length position `s` along the path.
fn eval_at_length(segments: &[(PathSeg, f64)], s: f64) -> Point {
    let mut remaining = s;
    for (i, &(seg, len)) in segments.iter().enumerate() {
        let is_last = i == segments.len() - 1;
        if remaining <= len || is_last {
            let t = seg.inv_arclen(remaining.min(len), ARCLEN_ACCURACY);
            return seg.eval(t);
        }
        remaining -= len;
    }
    Point::ZERO
}

/// Sample `count` evenly spaced points (by arc length) along the path,
/// each with the local tangent angle.
pub fn sample_path(data: &str, count: usize) -> Result<Vec<PathSample>, PathSampleError> {
    let path = parse_path(data)?;
    sample_bez_path(&path, count)
}

/// Sample an already-parsed path.
pub fn sample_bez_path(path: &BezPath, count: usize) -> Result<Vec<PathSample>, PathSampleError> {
    let segments: Vec<(PathSeg, f64)> = path
        .segments()
        .map(|seg| (seg, seg.arclen(ARCLEN_ACCURACY)))
        .collect();
    if segments.is_empty() {
        return Err(PathSampleError::Empty);
    }

    let total: f64 = segments.iter().map(|&(_, len)| len).sum();
    if total <= f64::EPSILON {
        return Err(PathSampleError::ZeroLength);
    }

    // Tangent via a small central difference in arc length; robust across
    // segment boundaries without per-curve derivative plumbing.
    let tangent_step = (total / 1000.0).max(1e-6);

    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        let s = total * i as f64 / count.max(1) as f64;
        let point = eval_at_length(&segments, s);
        let before = eval_at_length(&segments, (s - tangent_step).max(0.0));
        let after = eval_at_length(&segments, (s + tangent_step).min(total));
        let tangent_angle = (after.y - before.y).atan2(after.x - before.x);
        samples.push(PathSample {
            point,
            tangent_angle,
        });
    }
    Ok(samples)
}
