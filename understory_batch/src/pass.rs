// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::clock::Clock;
use crate::policy::{BatchPolicy, FixedBatches, partition};
use crate::token::CancellationToken;

/// Lifecycle of a render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassState {
    /// No pass has been started.
    Idle,
    /// The pass has batches left to draw.
    Running,
    /// Every item was drawn.
    Completed,
    /// The pass was stopped early. This is an expected outcome, not an error.
    Cancelled,
}

impl PassState {
    /// Returns `true` for [`PassState::Completed`] and [`PassState::Cancelled`].
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// The drawing side of a render pass.
pub trait DrawItems<T> {
    /// Clears the target. Called exactly once per pass, before the first batch.
    fn clear(&mut self);

    /// Draws one item. Draws are append-only.
    fn draw(&mut self, item: &T);
}

impl<T, D: DrawItems<T> + ?Sized> DrawItems<T> for &mut D {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn draw(&mut self, item: &T) {
        (**self).draw(item);
    }
}

/// One render pass over a snapshot of items.
///
/// The pass keeps its own `Arc` of the items so that the collection it draws
/// cannot change underneath it. Each [`RenderPass::step`] draws at most one
/// batch.
pub struct RenderPass<T> {
    items: Arc<[T]>,
    policy: BatchPolicy,
    fixed: Option<FixedBatches>,
    token: CancellationToken,
    cursor: usize,
    cleared: bool,
    batches: Vec<Range<usize>>,
    state: PassState,
}

impl<T> fmt::Debug for RenderPass<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPass")
            .field("len", &self.items.len())
            .field("policy", &self.policy)
            .field("cursor", &self.cursor)
            .field("batches", &self.batches.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<T> RenderPass<T> {
    /// Creates a running pass. Nothing is drawn until the first step.
    pub fn new(items: Arc<[T]>, policy: BatchPolicy, token: CancellationToken) -> Self {
        Self {
            fixed: partition(items.len(), policy),
            items,
            policy,
            token,
            cursor: 0,
            cleared: false,
            batches: Vec::new(),
            state: PassState::Running,
        }
    }

    /// Current state.
    pub fn state(&self) -> PassState {
        self.state
    }

    /// Token observed by this pass.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Items drawn by this pass.
    pub fn items(&self) -> &Arc<[T]> {
        &self.items
    }

    /// Number of items drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }

    /// Item ranges of the batches drawn so far, in order.
    pub fn batches(&self) -> &[Range<usize>] {
        &self.batches
    }

    /// Draws the next batch.
    ///
    /// The token is checked before the batch; a cancelled token moves the
    /// pass to [`PassState::Cancelled`] without drawing anything. The target
    /// is cleared before the first batch only. A pass over zero items clears
    /// and completes on its first step.
    pub fn step<C, D>(&mut self, clock: &C, sink: &mut D) -> PassState
    where
        C: Clock + ?Sized,
        D: DrawItems<T> + ?Sized,
    {
        if self.state != PassState::Running {
            return self.state;
        }
        if self.token.is_cancelled() {
            self.state = PassState::Cancelled;
            tracing::debug!(
                drawn = self.cursor,
                total = self.items.len(),
                "render pass cancelled"
            );
            return self.state;
        }
        if !self.cleared {
            sink.clear();
            self.cleared = true;
        }

        let start = self.cursor;
        let len = self.items.len();
        match self.policy {
            BatchPolicy::FixedSize(_) => {
                if let Some(batch) = self.fixed.as_mut().and_then(Iterator::next) {
                    for item in &self.items[batch.clone()] {
                        sink.draw(item);
                    }
                    self.cursor = batch.end;
                }
            }
            BatchPolicy::TimeBoxed(budget) => {
                let began = clock.now();
                while self.cursor < len {
                    sink.draw(&self.items[self.cursor]);
                    self.cursor += 1;
                    if clock.now().saturating_sub(began) >= budget {
                        break;
                    }
                }
            }
        }
        if self.cursor > start {
            tracing::trace!(start, end = self.cursor, "batch drawn");
            self.batches.push(start..self.cursor);
        }

        if self.cursor >= len {
            self.state = PassState::Completed;
            tracing::debug!(
                items = len,
                batches = self.batches.len(),
                "render pass completed"
            );
        }
        self.state
    }
}
