// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan/zoom gesture recognition.
//!
//! [`ZoomGesture`] turns raw pointer input into [`ZoomEvent`]s. Every
//! incremental update (each drag move, each wheel tick) produces an event
//! carrying a complete [`Transform`] snapshot, which callers feed into
//! [`TransformState::update_from`](crate::TransformState::update_from).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_view2d::{TransformState, ZoomGesture};
//!
//! let mut state = TransformState::new();
//! let mut gesture = ZoomGesture::default();
//!
//! gesture.pointer_down(Point::new(10.0, 10.0));
//! let ev = gesture.pointer_move(&state.transform(), Point::new(15.0, 12.0)).unwrap();
//! state.update_from(&ev).unwrap();
//! assert_eq!(state.transform().translate.x, 5.0);
//! assert!(gesture.pointer_up());
//!
//! let ev = gesture.wheel(&state.transform(), Point::new(100.0, 100.0), -500.0);
//! state.update_from(&ev).unwrap();
//! assert!(state.transform().scale > 1.0);
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::transform::Transform;

/// What produced a [`ZoomEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomSource {
    /// Pointer drag (pan).
    Drag,
    /// Wheel tick (zoom about the pointer).
    Wheel,
    /// Double click (zoom in about the pointer).
    DoubleClick,
    /// Set by code rather than by user input.
    Programmatic,
}

/// A pan/zoom update carrying the full resulting transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomEvent {
    /// Transform after this update.
    pub transform: Transform,
    /// Input that produced the update.
    pub source: ZoomSource,
    /// Surface point held fixed by a zoom; `None` for pans and programmatic
    /// updates.
    pub anchor: Option<Point>,
}

/// Default wheel sensitivity: one pixel of wheel delta scales by `2^-0.002`.
pub const DEFAULT_WHEEL_SENSITIVITY: f64 = 0.002;

/// Tracks drag state and converts pointer/wheel input into [`ZoomEvent`]s.
///
/// The gesture does not own the transform; each call takes the current
/// transform snapshot and returns the transform that should replace it.
#[derive(Clone, Copy, Debug)]
pub struct ZoomGesture {
    /// Start position of the drag operation.
    start_pos: Option<Point>,
    /// Last recorded pointer position during drag.
    last_pos: Option<Point>,
    wheel_sensitivity: f64,
}

impl Default for ZoomGesture {
    fn default() -> Self {
        Self {
            start_pos: None,
            last_pos: None,
            wheel_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
        }
    }
}

impl ZoomGesture {
    /// Creates a gesture recognizer with a custom wheel sensitivity.
    #[must_use]
    pub fn with_wheel_sensitivity(wheel_sensitivity: f64) -> Self {
        Self {
            wheel_sensitivity,
            ..Self::default()
        }
    }

    /// Start tracking a drag from the given surface position.
    pub fn pointer_down(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Update the drag with a new position.
    ///
    /// Returns a pan event for the movement since the previous update, or
    /// `None` when no drag is active or the pointer did not move.
    pub fn pointer_move(&mut self, current: &Transform, pos: Point) -> Option<ZoomEvent> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        let delta = pos - last;
        if delta.x == 0.0 && delta.y == 0.0 {
            return None;
        }
        Some(ZoomEvent {
            transform: current.translated(delta),
            source: ZoomSource::Drag,
            anchor: None,
        })
    }

    /// End the current drag. Returns `true` if a drag was active.
    pub fn pointer_up(&mut self) -> bool {
        let was = self.start_pos.is_some();
        self.start_pos = None;
        self.last_pos = None;
        was
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }

    /// Total drag offset from the start position, if dragging.
    #[must_use]
    pub fn drag_offset(&self) -> Option<kurbo::Vec2> {
        Some(self.last_pos? - self.start_pos?)
    }

    /// Zoom about `anchor` for a wheel tick of `delta_y` (negative zooms in).
    #[must_use]
    pub fn wheel(&self, current: &Transform, anchor: Point, delta_y: f64) -> ZoomEvent {
        let factor = 2.0_f64.powf(-delta_y * self.wheel_sensitivity);
        ZoomEvent {
            transform: current.scaled_about(anchor, factor),
            source: ZoomSource::Wheel,
            anchor: Some(anchor),
        }
    }

    /// Zoom in by a factor of two about `anchor`.
    #[must_use]
    pub fn double_click(&self, current: &Transform, anchor: Point) -> ZoomEvent {
        ZoomEvent {
            transform: current.scaled_about(anchor, 2.0),
            source: ZoomSource::DoubleClick,
            anchor: Some(anchor),
        }
    }
}
