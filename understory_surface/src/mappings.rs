// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::{Point, Rect, Size};
use understory_index::Aabb2D;
use understory_view2d::{Axis, LinearScale, Transform};

/// Domain extent of the data shown on a surface.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    /// Horizontal domain, mapped left to right.
    pub x: Range<f64>,
    /// Vertical domain, mapped bottom to top.
    pub y: Range<f64>,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            x: 0.0..1.0,
            y: 0.0..1.0,
        }
    }
}

impl Domain {
    /// Base mappings for a surface of `size`, before any pan/zoom.
    ///
    /// The Y range is inverted (`height..0`) so that larger values appear
    /// higher on the surface.
    pub fn base(&self, size: Size) -> Mappings {
        Mappings {
            x: LinearScale::new(self.x.clone(), 0.0..size.width),
            y: LinearScale::new(self.y.clone(), size.height..0.0),
        }
    }
}

/// Domain→surface mappings for both axes.
///
/// A render pass captures one `Mappings` value at its start and uses it for
/// every batch, even if the transform changes meanwhile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mappings {
    /// Horizontal mapping.
    pub x: LinearScale,
    /// Vertical mapping.
    pub y: LinearScale,
}

impl Mappings {
    /// Applies `transform` on top of these mappings.
    pub fn rescaled(&self, transform: &Transform) -> Self {
        Self {
            x: transform.rescale(&self.x, Axis::X),
            y: transform.rescale(&self.y, Axis::Y),
        }
    }

    /// Maps a domain point onto the surface.
    pub fn to_surface(&self, p: Point) -> Point {
        Point::new(self.x.map(p.x), self.y.map(p.y))
    }

    /// Maps a surface point back into the domain.
    pub fn to_domain(&self, p: Point) -> Point {
        Point::new(self.x.invert(p.x), self.y.invert(p.y))
    }

    /// Maps a surface rectangle into a domain box.
    ///
    /// The corners are normalized, since the Y range is usually inverted.
    pub fn surface_rect_to_domain(&self, rect: Rect) -> Aabb2D<f64> {
        let a = self.to_domain(Point::new(rect.x0, rect.y0));
        let b = self.to_domain(Point::new(rect.x1, rect.y1));
        Aabb2D::from_corners((a.x, a.y), (b.x, b.y))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};
    use understory_view2d::Transform;

    use super::Domain;

    #[test]
    fn base_inverts_y() {
        let domain = Domain {
            x: 0.0..10.0,
            y: 0.0..100.0,
        };
        let m = domain.base(Size::new(200.0, 50.0));
        assert_eq!(m.to_surface(Point::new(0.0, 0.0)), Point::new(0.0, 50.0));
        assert_eq!(m.to_surface(Point::new(10.0, 100.0)), Point::new(200.0, 0.0));
    }

    #[test]
    fn rescaled_maps_through_transform() {
        let domain = Domain {
            x: 0.0..100.0,
            y: 0.0..100.0,
        };
        let base = domain.base(Size::new(100.0, 100.0));
        let t = Transform::new(Vec2::new(10.0, -20.0), 2.0);
        let m = base.rescaled(&t);
        let p = Point::new(30.0, 40.0);
        let expect = t.apply(base.to_surface(p));
        assert!((m.to_surface(p) - expect).hypot() < 1e-9);
        assert!((m.to_domain(m.to_surface(p)) - p).hypot() < 1e-9);
    }

    #[test]
    fn surface_rect_maps_to_normalized_domain_box() {
        let domain = Domain {
            x: 0.0..100.0,
            y: 0.0..100.0,
        };
        let m = domain.base(Size::new(100.0, 100.0));
        let b = m.surface_rect_to_domain(Rect::new(10.0, 10.0, 20.0, 30.0));
        assert!(b.min_x <= b.max_x && b.min_y <= b.max_y);
        assert!((b.min_y - 70.0).abs() < 1e-9);
        assert!((b.max_y - 90.0).abs() < 1e-9);
    }
}
