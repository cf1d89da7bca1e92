// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::{Painter, StrokeStyle};

/// One call made on a [`RecordingPainter`].
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// [`Painter::clear`].
    Clear(Rect),
    /// [`Painter::set_stroke`].
    SetStroke(StrokeStyle),
    /// [`Painter::begin_path`].
    BeginPath,
    /// [`Painter::move_to`].
    MoveTo(Point),
    /// [`Painter::line_to`].
    LineTo(Point),
    /// [`Painter::curve_to`].
    CurveTo(Point, Point, Point),
    /// [`Painter::close_path`].
    ClosePath,
    /// [`Painter::stroke`].
    Stroke,
}

/// Painter that records operations instead of drawing.
///
/// It does not rasterize and does not validate path structure; it keeps the
/// calls in the order they were made so tests can assert on them.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    ops: Vec<PaintOp>,
    stroke: Option<StrokeStyle>,
}

impl RecordingPainter {
    /// Returns a slice of recorded operations.
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Takes the recorded operations, leaving the log empty.
    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        core::mem::take(&mut self.ops)
    }

    /// Clears the operation log. The current stroke style is kept.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Current stroke style, if one was ever set.
    pub fn current_stroke(&self) -> Option<StrokeStyle> {
        self.stroke
    }

    /// Number of [`PaintOp::Stroke`] operations recorded.
    pub fn stroke_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == PaintOp::Stroke).count()
    }

    /// Number of [`PaintOp::Clear`] operations recorded.
    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PaintOp::Clear(_)))
            .count()
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self, rect: Rect) {
        self.ops.push(PaintOp::Clear(rect));
    }

    fn set_stroke(&mut self, style: StrokeStyle) {
        self.stroke = Some(style);
        self.ops.push(PaintOp::SetStroke(style));
    }

    fn begin_path(&mut self) {
        self.ops.push(PaintOp::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.ops.push(PaintOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(PaintOp::LineTo(p));
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.ops.push(PaintOp::CurveTo(p1, p2, p3));
    }

    fn close_path(&mut self) {
        self.ops.push(PaintOp::ClosePath);
    }

    fn stroke(&mut self) {
        self.ops.push(PaintOp::Stroke);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Circle, Shape};
    use peniko::Color;

    use super::*;

    #[test]
    fn stroke_line_records_a_full_path() {
        let mut p = RecordingPainter::default();
        p.stroke_line(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        assert_eq!(
            p.ops(),
            [
                PaintOp::BeginPath,
                PaintOp::MoveTo(Point::new(1.0, 2.0)),
                PaintOp::LineTo(Point::new(3.0, 4.0)),
                PaintOp::Stroke,
            ]
        );
    }

    #[test]
    fn set_stroke_is_tracked() {
        let mut p = RecordingPainter::default();
        assert!(p.current_stroke().is_none());
        let style = StrokeStyle::new(Color::from_rgba8(255, 0, 0, 255), 2.0);
        p.set_stroke(style);
        assert_eq!(p.current_stroke(), Some(style));
        p.clear_ops();
        assert!(p.ops().is_empty());
        assert_eq!(p.current_stroke(), Some(style));
    }

    #[test]
    fn stroke_path_replays_elements() {
        let mut p = RecordingPainter::default();
        let circle = Circle::new((10.0, 10.0), 5.0).to_path(0.1);
        p.stroke_path(&circle);
        let ops = p.take_ops();
        assert_eq!(ops.first(), Some(&PaintOp::BeginPath));
        assert_eq!(ops.last(), Some(&PaintOp::Stroke));
        assert!(ops.iter().any(|op| matches!(op, PaintOp::CurveTo(..))));
        assert!(p.ops().is_empty());
    }

    #[test]
    fn counts() {
        let mut p = RecordingPainter::default();
        p.clear(Rect::new(0.0, 0.0, 1.0, 1.0));
        for _ in 0..3 {
            p.stroke_line(Point::ZERO, Point::new(1.0, 1.0));
        }
        assert_eq!(p.clear_count(), 1);
        assert_eq!(p.stroke_count(), 3);
    }
}
