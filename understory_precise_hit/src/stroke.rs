// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroked line segments.

use kurbo::{Line, Point};

use crate::{HitKind, HitParams, HitScore, PreciseHitTest, line_distance};

/// A straight stroked segment (centerline + half-width).
///
/// A point hits when its distance to the centerline, measured with
/// [`HitParams::distance_mode`], is at most the half-width plus
/// [`HitParams::stroke_tolerance`]. Joins and caps are not modeled.
#[derive(Clone, Copy, Debug)]
pub struct StrokedLine {
    /// The centerline segment in local coordinates.
    pub line: Line,
    /// Half of the stroke width in local units.
    pub half_width: f64,
}

impl StrokedLine {
    /// A zero-width segment between two points.
    #[must_use]
    pub fn hairline(p0: Point, p1: Point) -> Self {
        Self {
            line: Line::new(p0, p1),
            half_width: 0.0,
        }
    }
}

impl PreciseHitTest for StrokedLine {
    fn hit_test_local(&self, pt: Point, params: &HitParams) -> Option<HitScore> {
        let distance = line_distance(self.line, pt, params.distance_mode);
        (distance <= self.half_width + params.stroke_tolerance).then_some(HitScore {
            distance,
            kind: HitKind::Stroke,
        })
    }
}
