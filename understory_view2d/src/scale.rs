// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// Which axis of the surface a mapping belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

/// Linear mapping from a domain interval onto a range interval.
///
/// This is the base `f(v) = m * v + b` mapping of one chart axis before any
/// pan/zoom is applied. Neither interval has to be ascending; charts usually
/// map the Y domain onto `height..0` so that larger values appear higher.
///
/// A degenerate domain maps every value to the middle of the range, and a
/// degenerate range inverts every value to the middle of the domain.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    /// Creates a scale mapping `domain.start → range.start` and
    /// `domain.end → range.end`.
    #[must_use]
    pub fn new(domain: Range<f64>, range: Range<f64>) -> Self {
        Self {
            d0: domain.start,
            d1: domain.end,
            r0: range.start,
            r1: range.end,
        }
    }

    /// Returns the domain interval.
    #[must_use]
    pub fn domain(&self) -> Range<f64> {
        self.d0..self.d1
    }

    /// Returns the range interval.
    #[must_use]
    pub fn range(&self) -> Range<f64> {
        self.r0..self.r1
    }

    /// Returns a copy with a different range; the domain is kept.
    #[must_use]
    pub fn with_range(self, range: Range<f64>) -> Self {
        Self {
            r0: range.start,
            r1: range.end,
            ..self
        }
    }

    /// Returns a copy with a different domain; the range is kept.
    #[must_use]
    pub fn with_domain(self, domain: Range<f64>) -> Self {
        Self {
            d0: domain.start,
            d1: domain.end,
            ..self
        }
    }

    /// Maps a domain value into the range.
    #[must_use]
    pub fn map(&self, v: f64) -> f64 {
        let span = self.d1 - self.d0;
        if span == 0.0 {
            return (self.r0 + self.r1) * 0.5;
        }
        self.r0 + (v - self.d0) * (self.r1 - self.r0) / span
    }

    /// Maps a range value back into the domain.
    #[must_use]
    pub fn invert(&self, r: f64) -> f64 {
        let span = self.r1 - self.r0;
        if span == 0.0 {
            return (self.d0 + self.d1) * 0.5;
        }
        self.d0 + (r - self.r0) * (self.d1 - self.d0) / span
    }

    /// The `m` of `f(v) = m * v + b`; zero for a degenerate domain.
    #[must_use]
    pub fn slope(&self) -> f64 {
        let span = self.d1 - self.d0;
        if span == 0.0 {
            0.0
        } else {
            (self.r1 - self.r0) / span
        }
    }

    /// The `b` of `f(v) = m * v + b`.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.map(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn map_and_invert_roundtrip() {
        let s = LinearScale::new(10.0..20.0, 0.0..500.0);
        assert!((s.map(15.0) - 250.0).abs() < 1e-9);
        assert!((s.invert(s.map(12.34)) - 12.34).abs() < 1e-9);
        assert!((s.slope() - 50.0).abs() < 1e-9);
        assert!((s.offset() + 500.0).abs() < 1e-9);
    }

    #[test]
    fn inverted_range_for_y_axis() {
        let s = LinearScale::new(0.0..10.0, 300.0..0.0);
        assert!((s.map(0.0) - 300.0).abs() < 1e-9);
        assert!((s.map(10.0)).abs() < 1e-9);
        assert!((s.invert(150.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_intervals_map_to_midpoints() {
        let flat_domain = LinearScale::new(3.0..3.0, 0.0..100.0);
        assert!((flat_domain.map(-7.0) - 50.0).abs() < 1e-9);
        assert!(flat_domain.slope().abs() < 1e-12);

        let flat_range = LinearScale::new(0.0..8.0, 0.0..0.0);
        assert!((flat_range.invert(123.0) - 4.0).abs() < 1e-9);
    }
}
