// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes and index entries.

use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// Boxes are closed on all sides: two boxes that merely touch along an edge or
/// at a corner are considered intersecting.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Aabb2D<T> {
    /// Minimum X coordinate.
    pub min_x: T,
    /// Minimum Y coordinate.
    pub min_y: T,
    /// Maximum X coordinate.
    pub max_x: T,
    /// Maximum Y coordinate.
    pub max_y: T,
}

impl<T: Copy + PartialOrd + Debug> Aabb2D<T> {
    /// Creates a box from its corners.
    ///
    /// The caller is responsible for `min <= max` on both axes; use
    /// [`Aabb2D::from_corners`] when the ordering is not known.
    #[inline]
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates the orthogonal bounding box of two arbitrary corner points.
    ///
    /// The points may be given in any order; min/max are taken per axis.
    pub fn from_corners(a: (T, T), b: (T, T)) -> Self {
        let (min_x, max_x) = min_max(a.0, b.0);
        let (min_y, max_y) = min_max(a.1, b.1);
        Self::new(min_x, min_y, max_x, max_y)
    }

    /// Returns `true` if the box has a negative extent on either axis.
    ///
    /// A zero-area box (a point or a horizontal/vertical segment) is not empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.min_x <= self.max_x && self.min_y <= self.max_y)
    }

    /// Returns `true` if the point lies inside or on the boundary of the box.
    #[inline]
    pub fn contains_point(&self, x: T, y: T) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Returns `true` if the two boxes overlap; shared edges count as overlap.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Returns the intersection of two boxes.
    ///
    /// The result is [empty](Aabb2D::is_empty) when the boxes do not overlap.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(
            max_of(self.min_x, other.min_x),
            max_of(self.min_y, other.min_y),
            min_of(self.max_x, other.max_x),
            min_of(self.max_y, other.max_y),
        )
    }

    /// Returns the smallest box containing both boxes.
    ///
    /// An empty operand, including one with a NaN coordinate, contributes
    /// nothing.
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Self::new(
            min_of(self.min_x, other.min_x),
            min_of(self.min_y, other.min_y),
            max_of(self.max_x, other.max_x),
            max_of(self.max_y, other.max_y),
        )
    }
}

impl Aabb2D<f64> {
    /// Creates a box from an origin and a size.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// An indexed bounding box together with the caller's key for it.
///
/// The key is usually a small handle (for example a position in a segment
/// collection owned by the caller); the index never inspects it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entry<K, T = f64> {
    /// Bounding box of the indexed item.
    pub aabb: Aabb2D<T>,
    /// Caller-owned key identifying the item.
    pub key: K,
}

#[inline]
fn min_max<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if b < a { (b, a) } else { (a, b) }
}

#[inline]
fn min_of<T: PartialOrd>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

#[inline]
fn max_of<T: PartialOrd>(a: T, b: T) -> T {
    if b > a { b } else { a }
}
