// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view2d --heading-base-level=0

//! Understory View 2D: pan/zoom state and domain mappings for plot surfaces.
//!
//! This crate provides small, headless models of how data-space values land on
//! a pixel surface, and how user pan/zoom input modifies that mapping:
//! - [`LinearScale`]: a base domain→range mapping for one axis.
//! - [`Transform`]: a uniform translate + scale applied in surface space.
//! - [`TransformState`]: the single writable cell holding the current
//!   transform, fed by gesture events.
//! - [`ZoomGesture`]: turns pointer drags, wheel ticks, and double clicks
//!   into [`ZoomEvent`]s.
//!
//! It does **not** own any scene or rendering backend. Callers are expected
//! to take a [`Transform`] snapshot at the start of a render pass, derive the
//! rescaled mappings with [`Transform::rescale`], and keep using those
//! mappings for the whole pass.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_view2d::{Axis, LinearScale, TransformState, ZoomGesture};
//!
//! // Time 0..60 on an 800px wide surface.
//! let base_x = LinearScale::new(0.0..60.0, 0.0..800.0);
//!
//! let mut state = TransformState::new();
//! let gesture = ZoomGesture::default();
//!
//! // Double click at the left edge zooms in 2x about that point.
//! let ev = gesture.double_click(&state.transform(), Point::new(0.0, 0.0));
//! state.update_from(&ev).unwrap();
//!
//! let x = state.rescale(&base_x, Axis::X);
//! assert_eq!(x.map(30.0), 800.0);
//! assert_eq!(x.invert(800.0), 30.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod gesture;
mod scale;
mod state;
mod transform;

pub use gesture::{DEFAULT_WHEEL_SENSITIVITY, ZoomEvent, ZoomGesture, ZoomSource};
pub use scale::{Axis, LinearScale};
pub use state::{TransformError, TransformState};
pub use transform::Transform;
