// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_painter --heading-base-level=0

//! Understory Painter: the immediate-mode drawing seam for plot surfaces.
//!
//! Rendering code in Understory's plot crates talks to a [`Painter`], a small
//! path-building API in the style of a 2D canvas context: clear a region, set
//! a stroke style, build a path from `move_to`/`line_to`, and stroke it.
//! Hosts implement the trait over their real backend.
//!
//! [`RecordingPainter`] is a backend that draws nothing and records every
//! call as a [`PaintOp`]. It is intended for tests and headless hosts that
//! want to assert on the exact order of emitted operations.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use peniko::Color;
//! use understory_painter::{PaintOp, Painter, RecordingPainter, StrokeStyle};
//!
//! let mut painter = RecordingPainter::default();
//! painter.clear(Rect::new(0.0, 0.0, 100.0, 50.0));
//! painter.set_stroke(StrokeStyle::new(Color::WHITE, 1.0));
//! painter.stroke_line(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
//!
//! assert_eq!(painter.stroke_count(), 1);
//! assert!(matches!(painter.ops()[0], PaintOp::Clear(_)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod recording;

use kurbo::{BezPath, PathEl, Point, Rect};
use peniko::Color;

pub use recording::{PaintOp, RecordingPainter};

/// Color and width used by [`Painter::stroke`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in surface units.
    pub width: f64,
}

impl StrokeStyle {
    /// Creates a stroke style.
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color::BLACK, 1.0)
    }
}

/// Immediate-mode painter.
///
/// Calls are applied in order. The current path is started with
/// [`Painter::begin_path`] and consumed by [`Painter::stroke`], which uses
/// the most recently set [`StrokeStyle`].
pub trait Painter {
    /// Clears `rect` to transparent.
    fn clear(&mut self, rect: Rect);

    /// Sets the stroke style used by subsequent [`Painter::stroke`] calls.
    fn set_stroke(&mut self, style: StrokeStyle);

    /// Discards the current path and starts a new one.
    fn begin_path(&mut self);

    /// Starts a new subpath at `p`.
    fn move_to(&mut self, p: Point);

    /// Adds a straight line from the current point to `p`.
    fn line_to(&mut self, p: Point);

    /// Adds a cubic Bézier from the current point to `p3`.
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point);

    /// Closes the current subpath.
    fn close_path(&mut self);

    /// Strokes the current path.
    fn stroke(&mut self);

    /// Strokes a single straight line as its own path.
    fn stroke_line(&mut self, p0: Point, p1: Point) {
        self.begin_path();
        self.move_to(p0);
        self.line_to(p1);
        self.stroke();
    }

    /// Strokes `path` as its own path.
    ///
    /// Quadratic segments are raised to cubics.
    fn stroke_path(&mut self, path: &BezPath) {
        self.begin_path();
        let mut last = Point::ZERO;
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    self.move_to(p);
                    last = p;
                }
                PathEl::LineTo(p) => {
                    self.line_to(p);
                    last = p;
                }
                PathEl::QuadTo(p1, p2) => {
                    let c1 = last + (p1 - last) * (2.0 / 3.0);
                    let c2 = p2 + (p1 - p2) * (2.0 / 3.0);
                    self.curve_to(c1, c2, p2);
                    last = p2;
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    self.curve_to(p1, p2, p3);
                    last = p3;
                }
                PathEl::ClosePath => self.close_path(),
            }
        }
        self.stroke();
    }
}

impl<P: Painter + ?Sized> Painter for &mut P {
    fn clear(&mut self, rect: Rect) {
        (**self).clear(rect);
    }

    fn set_stroke(&mut self, style: StrokeStyle) {
        (**self).set_stroke(style);
    }

    fn begin_path(&mut self) {
        (**self).begin_path();
    }

    fn move_to(&mut self, p: Point) {
        (**self).move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        (**self).line_to(p);
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        (**self).curve_to(p1, p2, p3);
    }

    fn close_path(&mut self) {
        (**self).close_path();
    }

    fn stroke(&mut self) {
        (**self).stroke();
    }
}
