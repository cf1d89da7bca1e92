// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

use crate::scale::{Axis, LinearScale};

/// Uniform pan/zoom transform applied in surface space.
///
/// A transform maps a surface point `p` to `p * scale + translate`. It is
/// post-composed onto the base domain→range mappings (see
/// [`Transform::rescale`]), so zooming always happens about a surface-space
/// point rather than about a domain value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    /// Translation in surface units, applied after scaling.
    pub translate: Vec2,
    /// Uniform scale factor. Valid transforms have `scale > 0`.
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The neutral transform: no translation, scale `1`.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// Creates a transform from a translation and a scale.
    #[must_use]
    pub const fn new(translate: Vec2, scale: f64) -> Self {
        Self { translate, scale }
    }

    /// Returns `true` if the scale is strictly positive and every component
    /// is finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.scale.is_finite()
            && self.scale > 0.0
            && self.translate.x.is_finite()
            && self.translate.y.is_finite()
    }

    /// Applies the transform to a surface point.
    #[must_use]
    pub fn apply(&self, pt: Point) -> Point {
        Point::new(self.apply_x(pt.x), self.apply_y(pt.y))
    }

    /// Inverts the transform for a surface point.
    #[must_use]
    pub fn invert(&self, pt: Point) -> Point {
        Point::new(self.invert_x(pt.x), self.invert_y(pt.y))
    }

    /// Applies the transform to an X coordinate.
    #[must_use]
    pub fn apply_x(&self, x: f64) -> f64 {
        x * self.scale + self.translate.x
    }

    /// Applies the transform to a Y coordinate.
    #[must_use]
    pub fn apply_y(&self, y: f64) -> f64 {
        y * self.scale + self.translate.y
    }

    /// Inverts the transform for an X coordinate.
    #[must_use]
    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.translate.x) / self.scale
    }

    /// Inverts the transform for a Y coordinate.
    #[must_use]
    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.translate.y) / self.scale
    }

    fn invert_axis(&self, v: f64, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.invert_x(v),
            Axis::Y => self.invert_y(v),
        }
    }

    /// The transform as a Kurbo affine: translate after scale.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    /// Returns this transform panned by `delta` surface units.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            translate: self.translate + delta,
            scale: self.scale,
        }
    }

    /// Returns this transform zoomed by `factor` about a surface-space anchor.
    ///
    /// The point under `anchor` stays under `anchor`.
    #[must_use]
    pub fn scaled_about(&self, anchor: Point, factor: f64) -> Self {
        self.with_scale_about(anchor, self.scale * factor)
    }

    /// Returns this transform with scale `scale`, keeping the point under
    /// `anchor` fixed.
    #[must_use]
    pub fn with_scale_about(&self, anchor: Point, scale: f64) -> Self {
        let fixed = self.invert(anchor);
        Self {
            translate: anchor.to_vec2() - fixed.to_vec2() * scale,
            scale,
        }
    }

    /// Applies this transform on top of a base mapping for one axis.
    ///
    /// The returned scale keeps the base range and gets the domain that is
    /// visible through the transform, so that for every domain value `v`:
    ///
    /// `rescaled.map(v) == base.map(v) * scale + translate[axis]`
    ///
    /// and inverting `rescaled` equals inverting the transform followed by
    /// inverting `base`.
    #[must_use]
    pub fn rescale(&self, base: &LinearScale, axis: Axis) -> LinearScale {
        let range = base.range();
        let d0 = base.invert(self.invert_axis(range.start, axis));
        let d1 = base.invert(self.invert_axis(range.end, axis));
        base.with_domain(d0..d1)
    }
}
