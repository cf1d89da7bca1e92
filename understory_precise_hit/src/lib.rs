// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_precise_hit --heading-base-level=0

//! Understory Precise Hit: geometry-level hit testing for candidates.
//!
//! A coarse spatial index narrows a query down to a few candidates whose
//! bounding boxes overlap a tolerance rectangle. This crate answers the
//! follow-up question for each candidate: is the query point actually within
//! the tolerance of the geometry?
//!
//! - [`PreciseHitTest`]: implemented by shapes that can score a local point.
//! - [`HitParams`]: tolerance and [`DistanceMode`] used by the test.
//! - [`StrokedLine`]: a straight segment with an optional half-width.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Line, Point};
//! use understory_precise_hit::{DistanceMode, HitParams, PreciseHitTest, StrokedLine};
//!
//! let seg = StrokedLine { line: Line::new((0.0, 0.0), (10.0, 0.0)), half_width: 0.0 };
//! let params = HitParams::default();
//!
//! // Exactly on the tolerance boundary counts as a hit.
//! assert!(seg.hit_test_local(Point::new(5.0, 5.0), &params).is_some());
//! // Beyond the end cap the finite segment misses...
//! assert!(seg.hit_test_local(Point::new(14.0, 4.0), &params).is_none());
//! // ...while the infinite line through the segment still hits.
//! let line_params = HitParams { distance_mode: DistanceMode::InfiniteLine, ..params };
//! assert!(seg.hit_test_local(Point::new(14.0, 4.0), &line_params).is_some());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod stroke;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, ParamCurveNearest, Point};

pub use stroke::StrokedLine;

/// Tolerance used when no other value is configured, in surface units.
pub const DEFAULT_STROKE_TOLERANCE: f64 = 5.0;

/// How the distance from a point to a line segment is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceMode {
    /// Distance to the closest point of the finite segment.
    #[default]
    Segment,
    /// Perpendicular distance to the infinite line through both endpoints.
    ///
    /// Points beyond either endpoint can still hit when they lie near the
    /// line's extension. Degenerate (zero-length) segments fall back to
    /// point distance.
    InfiniteLine,
}

/// Parameters shared by every precise hit test.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitParams {
    /// Extra distance, beyond the geometry itself, that still counts as a hit.
    /// The boundary is inclusive.
    pub stroke_tolerance: f64,
    /// Distance measure used for line geometry.
    pub distance_mode: DistanceMode,
}

impl Default for HitParams {
    fn default() -> Self {
        Self {
            stroke_tolerance: DEFAULT_STROKE_TOLERANCE,
            distance_mode: DistanceMode::default(),
        }
    }
}

/// What part of the geometry was hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    /// The query point was near a stroke.
    Stroke,
}

/// Result of a successful precise hit test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitScore {
    /// Distance from the query point to the geometry.
    pub distance: f64,
    /// Kind of hit.
    pub kind: HitKind,
}

/// Geometry that can decide whether a point in its local space hits it.
pub trait PreciseHitTest {
    /// Returns a score when `pt` hits, `None` otherwise.
    fn hit_test_local(&self, pt: Point, params: &HitParams) -> Option<HitScore>;
}

/// Distance from `pt` to `line` under the given mode.
#[must_use]
pub fn line_distance(line: Line, pt: Point, mode: DistanceMode) -> f64 {
    match mode {
        DistanceMode::Segment => line.nearest(pt, 0.).distance_sq.sqrt(),
        DistanceMode::InfiniteLine => {
            let d = line.p1 - line.p0;
            let len = d.hypot();
            if len == 0.0 {
                return (pt - line.p0).hypot();
            }
            d.cross(pt - line.p0).abs() / len
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Line, Point};

    use super::{DistanceMode, line_distance};

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let line = Line::new((0.0, 0.0), (10.0, 0.0));
        let d = line_distance(line, Point::new(13.0, 4.0), DistanceMode::Segment);
        assert!((d - 5.0).abs() < 1e-12);
        let d = line_distance(line, Point::new(13.0, 4.0), DistanceMode::InfiniteLine);
        assert!((d - 4.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_line_uses_point_distance() {
        let line = Line::new((2.0, 2.0), (2.0, 2.0));
        for mode in [DistanceMode::Segment, DistanceMode::InfiniteLine] {
            let d = line_distance(line, Point::new(5.0, 6.0), mode);
            assert!((d - 5.0).abs() < 1e-12);
        }
    }

    #[test]
    fn distance_is_symmetric_in_endpoint_order() {
        let a = Line::new((1.0, 1.0), (9.0, 4.0));
        let b = Line::new((9.0, 4.0), (1.0, 1.0));
        let pt = Point::new(3.0, 7.0);
        for mode in [DistanceMode::Segment, DistanceMode::InfiniteLine] {
            assert!((line_distance(a, pt, mode) - line_distance(b, pt, mode)).abs() < 1e-12);
        }
    }
}
