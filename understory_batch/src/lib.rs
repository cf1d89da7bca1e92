// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_batch --heading-base-level=0

//! Understory Batch: draw large item sets without blocking the UI thread.
//!
//! A render pass over a large, ordered item collection is split into batches.
//! The host's event loop drives the pass one batch at a time by calling
//! [`BatchRenderer::pump`], and is free to process input between calls. That
//! is the only yield point: items inside one batch are always drawn together.
//!
//! - [`BatchPolicy`]: fixed-size batches or time-boxed batches.
//! - [`CancellationToken`]: one-way flag checked before every batch.
//! - [`RenderPass`]: one pass over a snapshot of the items, with the state
//!   machine `Idle → Running → {Completed | Cancelled}`.
//! - [`BatchRenderer`]: owns at most one running pass. Starting a new pass
//!   cancels the previous one before anything of the new pass is drawn.
//! - [`DrawItems`]: the drawing side; cleared once per pass, then fed items.
//!
//! ## Example
//!
//! ```rust
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! use understory_batch::{BatchPolicy, BatchRenderer, DrawItems, PassState};
//!
//! #[derive(Default)]
//! struct Collect {
//!     clears: usize,
//!     drawn: Vec<u32>,
//! }
//!
//! impl DrawItems<u32> for Collect {
//!     fn clear(&mut self) {
//!         self.clears += 1;
//!     }
//!     fn draw(&mut self, item: &u32) {
//!         self.drawn.push(*item);
//!     }
//! }
//!
//! let mut renderer = BatchRenderer::new(BatchPolicy::FixedSize(NonZeroUsize::new(2).unwrap()));
//! let mut sink = Collect::default();
//! renderer.start(Arc::from(vec![1, 2, 3]));
//!
//! assert_eq!(renderer.pump(&mut sink), PassState::Running);
//! assert_eq!(sink.drawn, [1, 2]);
//! assert_eq!(renderer.pump(&mut sink), PassState::Completed);
//! assert_eq!(sink.drawn, [1, 2, 3]);
//! assert_eq!(sink.clears, 1);
//! ```

mod clock;
mod pass;
mod policy;
mod renderer;
mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use pass::{DrawItems, PassState, RenderPass};
pub use policy::{
    BatchPolicy, DEFAULT_BATCH_DURATION, DEFAULT_BATCH_SIZE, FixedBatches, partition,
};
pub use renderer::BatchRenderer;
pub use token::CancellationToken;
