// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::gesture::ZoomEvent;
use crate::scale::{Axis, LinearScale};
use crate::transform::Transform;

/// Errors reported by [`TransformState`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// The scale was zero, negative, or not finite.
    #[error("invalid transform scale {scale}; scale must be finite and > 0")]
    InvalidScale {
        /// The rejected scale.
        scale: f64,
    },
    /// The translation was not finite.
    #[error("invalid transform translation ({x}, {y}); translation must be finite")]
    InvalidTranslate {
        /// Rejected X translation.
        x: f64,
        /// Rejected Y translation.
        y: f64,
    },
}

/// Holder of the current pan/zoom [`Transform`].
///
/// This is the single writable cell for the transform of one surface. Only the
/// gesture handler writes to it (through [`TransformState::update_from`]);
/// everything else reads a [`Transform`] snapshot, typically once per render
/// pass via [`TransformState::rescale`].
///
/// An optional scale extent clamps incoming scales. A clamped zoom keeps the
/// point under its anchor fixed, so zooming past a bound stops in place
/// rather than sliding the view. Invalid transforms are rejected and leave the
/// previous transform in place.
#[derive(Clone, Debug)]
pub struct TransformState {
    current: Transform,
    scale_extent: Option<(f64, f64)>,
    revision: u64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformState {
    /// Creates a state holding the identity transform and no scale extent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Transform::IDENTITY,
            scale_extent: None,
            revision: 0,
        }
    }

    /// The neutral transform.
    #[must_use]
    pub fn identity() -> Transform {
        Transform::IDENTITY
    }

    /// Snapshot of the current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.current
    }

    /// Counter bumped every time the stored transform actually changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the configured `[min, max]` scale extent, if any.
    #[must_use]
    pub fn scale_extent(&self) -> Option<(f64, f64)> {
        self.scale_extent
    }

    /// Limits future scales to `[min, max]`.
    ///
    /// The bounds are normalized so that `min <= max`; both must be finite and
    /// positive. The current transform is clamped into the new extent about
    /// the surface origin.
    pub fn set_scale_extent(&mut self, min: f64, max: f64) -> Result<(), TransformError> {
        for s in [min, max] {
            if !(s.is_finite() && s > 0.0) {
                return Err(TransformError::InvalidScale { scale: s });
            }
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.scale_extent = Some((min, max));
        let clamped = self.clamp(self.current, Point::ZERO);
        self.replace(clamped);
        Ok(())
    }

    /// Removes any scale extent.
    pub fn clear_scale_extent(&mut self) {
        self.scale_extent = None;
    }

    /// Applies the current transform on top of `base` for `axis`.
    ///
    /// See [`Transform::rescale`].
    #[must_use]
    pub fn rescale(&self, base: &LinearScale, axis: Axis) -> LinearScale {
        self.current.rescale(base, axis)
    }

    /// Replaces the current transform with the one carried by a gesture event.
    ///
    /// Returns the transform that was stored, which differs from the event's
    /// when the scale had to be clamped. Clamping holds the event's anchor
    /// fixed, or the surface origin for events without one.
    pub fn update_from(&mut self, event: &ZoomEvent) -> Result<Transform, TransformError> {
        self.store(event.transform, event.anchor.unwrap_or(Point::ZERO))
    }

    /// Replaces the current transform.
    ///
    /// Non-positive or non-finite scales and non-finite translations are
    /// rejected; the previous transform is retained. A scale outside the
    /// extent is clamped about the surface origin.
    pub fn set(&mut self, transform: Transform) -> Result<Transform, TransformError> {
        self.store(transform, Point::ZERO)
    }

    fn store(&mut self, transform: Transform, anchor: Point) -> Result<Transform, TransformError> {
        if !(transform.scale.is_finite() && transform.scale > 0.0) {
            return Err(TransformError::InvalidScale {
                scale: transform.scale,
            });
        }
        if !(transform.translate.x.is_finite() && transform.translate.y.is_finite()) {
            return Err(TransformError::InvalidTranslate {
                x: transform.translate.x,
                y: transform.translate.y,
            });
        }
        let clamped = self.clamp(transform, anchor);
        self.replace(clamped);
        Ok(clamped)
    }

    /// Resets to the identity transform.
    pub fn reset(&mut self) {
        self.replace(Transform::IDENTITY);
    }

    fn clamp(&self, t: Transform, anchor: Point) -> Transform {
        match self.scale_extent {
            Some((min, max)) if !(min..=max).contains(&t.scale) => {
                t.with_scale_about(anchor, t.scale.clamp(min, max))
            }
            _ => t,
        }
    }

    fn replace(&mut self, t: Transform) {
        if self.current != t {
            self.current = t;
            self.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::{TransformError, TransformState};
    use crate::gesture::{ZoomEvent, ZoomGesture, ZoomSource};
    use crate::scale::{Axis, LinearScale};
    use crate::transform::Transform;

    fn event(translate: (f64, f64), scale: f64) -> ZoomEvent {
        ZoomEvent {
            transform: Transform::new(Vec2::new(translate.0, translate.1), scale),
            source: ZoomSource::Programmatic,
            anchor: None,
        }
    }

    #[test]
    fn starts_at_identity() {
        let state = TransformState::new();
        assert_eq!(state.transform(), TransformState::identity());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn update_from_replaces_and_bumps_revision() {
        let mut state = TransformState::new();
        let stored = state.update_from(&event((5.0, 6.0), 2.0)).unwrap();
        assert_eq!(stored.scale, 2.0);
        assert_eq!(state.transform().translate, Vec2::new(5.0, 6.0));
        assert_eq!(state.revision(), 1);

        // Same transform again: no change.
        state.update_from(&event((5.0, 6.0), 2.0)).unwrap();
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn non_positive_scale_is_rejected_and_previous_kept() {
        let mut state = TransformState::new();
        state.update_from(&event((1.0, 1.0), 3.0)).unwrap();
        let before = state.transform();

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = state.update_from(&event((9.0, 9.0), bad)).unwrap_err();
            assert!(matches!(err, TransformError::InvalidScale { .. }));
            assert_eq!(state.transform(), before);
        }

        let err = state.update_from(&event((f64::NAN, 0.0), 1.0)).unwrap_err();
        assert!(matches!(err, TransformError::InvalidTranslate { .. }));
        assert_eq!(state.transform(), before);
    }

    #[test]
    fn scale_extent_clamps() {
        let mut state = TransformState::new();
        state.set_scale_extent(8.0, 0.5).unwrap();
        assert_eq!(state.scale_extent(), Some((0.5, 8.0)));

        let stored = state.update_from(&event((0.0, 0.0), 100.0)).unwrap();
        assert_eq!(stored.scale, 8.0);
        let stored = state.update_from(&event((0.0, 0.0), 0.01)).unwrap();
        assert_eq!(stored.scale, 0.5);

        assert!(state.set_scale_extent(0.0, 2.0).is_err());
    }

    #[test]
    fn wheel_past_max_scale_keeps_anchor_fixed() {
        let mut state = TransformState::new();
        state.set_scale_extent(0.5, 2.0).unwrap();
        let gesture = ZoomGesture::default();
        let anchor = Point::new(100.0, 100.0);
        for _ in 0..4 {
            let ev = gesture.wheel(&state.transform(), anchor, -500.0);
            state.update_from(&ev).unwrap();
            assert_eq!(state.transform().invert(anchor), anchor);
        }
        assert_eq!(state.transform(), Transform::new(Vec2::new(-100.0, -100.0), 2.0));
        // Zooms stopped by the bound leave the stored transform alone.
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn clamped_zoom_out_keeps_anchor_fixed() {
        let mut state = TransformState::new();
        state.set_scale_extent(0.5, 8.0).unwrap();
        let gesture = ZoomGesture::default();
        let anchor = Point::new(40.0, 60.0);
        let ev = gesture.wheel(&state.transform(), anchor, 2000.0);
        let stored = state.update_from(&ev).unwrap();
        assert_eq!(stored.scale, 0.5);
        assert_eq!(stored.invert(anchor), anchor);
    }

    #[test]
    fn reset_and_rescale() {
        let mut state = TransformState::new();
        state.update_from(&event((10.0, 0.0), 2.0)).unwrap();
        let base = LinearScale::new(0.0..10.0, 0.0..100.0);
        let r = state.rescale(&base, Axis::X);
        assert!((r.map(5.0) - 110.0).abs() < 1e-9);

        state.reset();
        assert_eq!(state.transform(), Transform::IDENTITY);
        let r = state.rescale(&base, Axis::X);
        assert!((r.map(5.0) - 50.0).abs() < 1e-9);
    }
}
