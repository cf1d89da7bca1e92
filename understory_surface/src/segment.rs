// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Line, Point};
use peniko::Color;
use understory_index::{Aabb2D, Entry};

/// A straight line segment in domain space with an attribute value.
///
/// The value drives the visual encoding (see [`ColorRamp`]). Segments are
/// immutable once produced; a changed dataset is a new segment collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// First endpoint.
    pub p1: Point,
    /// Second endpoint.
    pub p2: Point,
    /// Attribute value, e.g. a speed.
    pub value: f64,
}

impl Segment {
    /// Creates a segment.
    pub fn new(p1: impl Into<Point>, p2: impl Into<Point>, value: f64) -> Self {
        Self {
            p1: p1.into(),
            p2: p2.into(),
            value,
        }
    }

    /// Axis-aligned bounding box of the two endpoints.
    pub fn bounds(&self) -> Aabb2D<f64> {
        Aabb2D::from_corners((self.p1.x, self.p1.y), (self.p2.x, self.p2.y))
    }

    /// The segment as a Kurbo line.
    pub fn line(&self) -> Line {
        Line::new(self.p1, self.p2)
    }

    /// Index entry keyed by `key`.
    pub fn entry(&self, key: usize) -> Entry<usize> {
        Entry {
            aabb: self.bounds(),
            key,
        }
    }
}

/// Piecewise-linear color scale over evenly spaced stops.
///
/// Stops are spread across `[min, max]`; values outside the domain clamp to
/// the end colors. Interpolation happens on the color components as stored.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    min: f64,
    max: f64,
    stops: Vec<Color>,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl ColorRamp {
    /// Red, yellow, green, blue.
    pub const DEFAULT_STOPS: [Color; 4] = [
        Color::from_rgba8(255, 0, 0, 255),
        Color::from_rgba8(255, 255, 0, 255),
        Color::from_rgba8(0, 128, 0, 255),
        Color::from_rgba8(0, 0, 255, 255),
    ];

    /// Ramp over `[min, max]` using [`ColorRamp::DEFAULT_STOPS`].
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            stops: Self::DEFAULT_STOPS.to_vec(),
        }
    }

    /// Ramp over `[min, max]` with custom stops. Returns `None` without stops.
    pub fn with_stops(min: f64, max: f64, stops: Vec<Color>) -> Option<Self> {
        (!stops.is_empty()).then_some(Self { min, max, stops })
    }

    /// Ramp spanning the value range of `segments`.
    pub fn spanning(segments: &[Segment]) -> Self {
        let (min, max) = segments
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s.value), hi.max(s.value))
            });
        if min > max {
            Self::default()
        } else {
            Self::new(min, max)
        }
    }

    /// The value domain.
    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// The stops, in order.
    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Color for `value`.
    pub fn color(&self, value: f64) -> Color {
        let last = self.stops.len() - 1;
        let span = self.max - self.min;
        let t = if span == 0.0 || !span.is_finite() || value.is_nan() {
            0.0
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        };
        let pos = t * last as f64;
        let i = stop_index(pos).min(last);
        if i == last {
            return self.stops[last];
        }
        lerp(self.stops[i], self.stops[i + 1], pos - i as f64)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "pos is within [0, stops.len() - 1]"
)]
fn stop_index(pos: f64) -> usize {
    pos.floor() as usize
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "fractions in [0, 1] fit f32 color math"
)]
fn lerp(a: Color, b: Color, t: f64) -> Color {
    let t = t as f32;
    let mut out = [0.0_f32; 4];
    for (o, (x, y)) in out.iter_mut().zip(a.components.iter().zip(b.components)) {
        *o = x + (y - x) * t;
    }
    Color::new(out)
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use peniko::Color;

    use super::{ColorRamp, Segment};

    #[test]
    fn bounds_normalize_endpoint_order() {
        let s = Segment::new((10.0, 5.0), (2.0, 8.0), 1.0);
        let b = s.bounds();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (2.0, 5.0, 10.0, 8.0));
        assert_eq!(s.line().p0, Point::new(10.0, 5.0));
        assert_eq!(s.entry(7).key, 7);
    }

    #[test]
    fn ramp_hits_stops_and_clamps() {
        let ramp = ColorRamp::new(0.0, 30.0);
        assert_eq!(ramp.color(0.0), ColorRamp::DEFAULT_STOPS[0]);
        assert_eq!(ramp.color(10.0), ColorRamp::DEFAULT_STOPS[1]);
        assert_eq!(ramp.color(30.0), ColorRamp::DEFAULT_STOPS[3]);
        assert_eq!(ramp.color(-5.0), ColorRamp::DEFAULT_STOPS[0]);
        assert_eq!(ramp.color(1e9), ColorRamp::DEFAULT_STOPS[3]);
    }

    #[test]
    fn ramp_interpolates_between_stops() {
        let ramp = ColorRamp::with_stops(
            0.0,
            1.0,
            vec![
                Color::from_rgba8(0, 0, 0, 255),
                Color::from_rgba8(255, 255, 255, 255),
            ],
        )
        .unwrap();
        let mid = ramp.color(0.5);
        for c in &mid.components[..3] {
            assert!((c - 0.5).abs() < 1e-6);
        }
        assert!(ColorRamp::with_stops(0.0, 1.0, Vec::new()).is_none());
    }

    #[test]
    fn degenerate_domain_uses_first_stop() {
        let ramp = ColorRamp::new(4.0, 4.0);
        assert_eq!(ramp.color(4.0), ColorRamp::DEFAULT_STOPS[0]);
    }

    #[test]
    fn spanning_uses_value_extent() {
        let segs = [
            Segment::new((0.0, 0.0), (1.0, 1.0), 3.0),
            Segment::new((0.0, 0.0), (1.0, 1.0), -2.0),
        ];
        assert_eq!(ColorRamp::spanning(&segs).domain(), (-2.0, 3.0));
        assert_eq!(ColorRamp::spanning(&[]).domain(), (0.0, 1.0));
    }
}
