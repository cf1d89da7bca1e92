// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_surface --heading-base-level=0

//! Understory Surface: an interactive plot surface for large segment sets.
//!
//! This crate wires the headless Understory building blocks into one
//! resizable, pannable, zoomable surface that draws line segments and
//! highlights the ones near the pointer:
//! - size observation from `understory_size_observer`,
//! - the pan/zoom [`Transform`](understory_view2d::Transform) from
//!   `understory_view2d`,
//! - the bounding-box [`Index`](understory_index::Index) from
//!   `understory_index` with precise filtering from `understory_precise_hit`,
//! - cancellable batched rendering from `understory_batch`,
//! - drawing through the [`Painter`](understory_painter::Painter) seam.
//!
//! The main type is [`InteractiveSurface`]. [`ResponsiveSurface`] is the
//! lower-level host for custom draw callbacks, and [`hit_test`] exposes the
//! pointer hit-testing policy on its own.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_painter::RecordingPainter;
//! use understory_surface::{Domain, InteractiveSurface, PassState, Segment, SurfaceConfig};
//!
//! let mut surface = InteractiveSurface::new(
//!     || Some(Size::new(200.0, 200.0)),
//!     Domain { x: 0.0..200.0, y: 0.0..200.0 },
//!     SurfaceConfig::default(),
//! )
//! .unwrap();
//! surface.set_segments(vec![
//!     Segment::new((0.0, 100.0), (50.0, 100.0), 1.0),
//!     Segment::new((150.0, 20.0), (160.0, 20.0), 2.0),
//! ]);
//! surface.mount();
//!
//! let mut layer = RecordingPainter::default();
//! assert_eq!(surface.finish_pass(&mut layer), PassState::Completed);
//! assert_eq!(layer.stroke_count(), 2);
//!
//! // Domain y = 100 lands at surface y = 100 on a 200px high surface.
//! assert_eq!(surface.pointer_move(Point::new(20.0, 103.0)), Some(&[0][..]));
//! ```

mod config;
mod hit;
mod interactive;
mod mappings;
mod overlay;
mod responsive;
mod segment;

pub use config::{ConfigError, OverlayStyle, SurfaceConfig};
pub use hit::{hit_test, surface_bounds};
pub use interactive::InteractiveSurface;
pub use mappings::{Domain, Mappings};
pub use overlay::HighlightOverlay;
pub use responsive::ResponsiveSurface;
pub use segment::{ColorRamp, Segment};
pub use understory_batch::{BatchPolicy, CancellationToken, PassState};
