// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Circle, Point, Rect, Shape, Size};
use understory_painter::Painter;

use crate::config::OverlayStyle;
use crate::hit::surface_bounds;
use crate::mappings::Mappings;
use crate::segment::Segment;

const CURVE_TOLERANCE: f64 = 0.1;

/// Pointer highlight state, drawn on its own layer above the segments.
///
/// `pointer == None` means the pointer is not over the surface. When it is,
/// [`HighlightOverlay::matches`] holds the keys of the segments near it; an
/// empty list is a valid "nothing nearby" result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightOverlay {
    pointer: Option<Point>,
    matches: Vec<usize>,
}

impl HighlightOverlay {
    /// Replaces the overlay state. Matches are dropped when `pointer` is `None`.
    pub fn update(&mut self, pointer: Option<Point>, matches: Vec<usize>) {
        self.pointer = pointer;
        self.matches = if pointer.is_some() { matches } else { Vec::new() };
    }

    /// Forgets the pointer and any matches.
    pub fn clear(&mut self) {
        self.update(None, Vec::new());
    }

    /// Pointer position in surface space, if over the surface.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Keys of the matched segments, or `None` when the pointer is away.
    pub fn matches(&self) -> Option<&[usize]> {
        self.pointer.map(|_| self.matches.as_slice())
    }

    /// Clears the overlay layer and draws the current highlight.
    ///
    /// Strokes a circle of `radius` around the pointer and, when anything
    /// matched, the surface-space bounding rectangle of the matched segments.
    pub fn draw<P: Painter + ?Sized>(
        &self,
        painter: &mut P,
        size: Size,
        segments: &[Segment],
        mappings: &Mappings,
        radius: f64,
        style: &OverlayStyle,
    ) {
        painter.clear(Rect::from_origin_size(Point::ZERO, size));
        let Some(pointer) = self.pointer else {
            return;
        };
        painter.set_stroke(style.pointer);
        painter.stroke_path(&Circle::new(pointer, radius).to_path(CURVE_TOLERANCE));
        if let Some(bounds) = surface_bounds(segments, &self.matches, mappings) {
            painter.set_stroke(style.matches);
            painter.stroke_path(&bounds.to_path(CURVE_TOLERANCE));
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};
    use understory_painter::{PaintOp, RecordingPainter};

    use super::HighlightOverlay;
    use crate::config::OverlayStyle;
    use crate::mappings::Domain;
    use crate::segment::Segment;

    fn setup() -> (Vec<Segment>, crate::mappings::Mappings) {
        let segments = vec![Segment::new((10.0, 10.0), (20.0, 10.0), 0.0)];
        let m = Domain {
            x: 0.0..100.0,
            y: 0.0..100.0,
        }
        .base(Size::new(100.0, 100.0));
        (segments, m)
    }

    #[test]
    fn none_pointer_means_no_result_and_no_drawing() {
        let (segments, m) = setup();
        let mut overlay = HighlightOverlay::default();
        overlay.update(None, vec![0]);
        assert_eq!(overlay.matches(), None);

        let mut p = RecordingPainter::default();
        overlay.draw(&mut p, Size::new(100.0, 100.0), &segments, &m, 5.0, &OverlayStyle::default());
        assert_eq!(p.ops(), [PaintOp::Clear(Rect::new(0.0, 0.0, 100.0, 100.0))]);
    }

    #[test]
    fn empty_matches_draw_only_the_pointer() {
        let (segments, m) = setup();
        let mut overlay = HighlightOverlay::default();
        overlay.update(Some(Point::new(50.0, 50.0)), Vec::new());
        assert_eq!(overlay.matches(), Some(&[][..]));

        let mut p = RecordingPainter::default();
        overlay.draw(&mut p, Size::new(100.0, 100.0), &segments, &m, 5.0, &OverlayStyle::default());
        assert_eq!(p.clear_count(), 1);
        assert_eq!(p.stroke_count(), 1);
    }

    #[test]
    fn matches_add_a_bounds_rectangle() {
        let (segments, m) = setup();
        let mut overlay = HighlightOverlay::default();
        overlay.update(Some(Point::new(15.0, 90.0)), vec![0]);
        assert_eq!(overlay.matches(), Some(&[0][..]));

        let mut p = RecordingPainter::default();
        let style = OverlayStyle::default();
        overlay.draw(&mut p, Size::new(100.0, 100.0), &segments, &m, 5.0, &style);
        assert_eq!(p.stroke_count(), 2);
        assert_eq!(p.current_stroke(), Some(style.matches));
        // The rectangle starts at the mapped top-left corner.
        assert!(p.ops().contains(&PaintOp::MoveTo(Point::new(10.0, 90.0))));

        overlay.clear();
        assert_eq!(overlay.pointer(), None);
    }
}
