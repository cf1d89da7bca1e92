// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::num::NonZeroUsize;
use std::ops::Range;
use std::time::Duration;

/// Default number of items per fixed-size batch.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

/// Default time budget per time-boxed batch.
pub const DEFAULT_BATCH_DURATION: Duration = Duration::from_millis(10);

/// How a pass is split into batches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BatchPolicy {
    /// Every batch holds exactly this many items, except possibly the last.
    FixedSize(NonZeroUsize),
    /// A batch keeps drawing items until this much time has elapsed.
    ///
    /// A batch always holds at least one item, so a pass makes progress even
    /// when a single item exceeds the budget.
    TimeBoxed(Duration),
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self::FixedSize(DEFAULT_BATCH_SIZE)
    }
}

impl BatchPolicy {
    /// Time-boxed policy with [`DEFAULT_BATCH_DURATION`].
    pub fn time_boxed() -> Self {
        Self::TimeBoxed(DEFAULT_BATCH_DURATION)
    }
}

/// Splits `0..len` into the batches `policy` prescribes.
///
/// For [`BatchPolicy::FixedSize`] the result is total, ordered, and
/// non-overlapping. Time-boxed batches depend on how long each draw takes,
/// so the split is only known while drawing (see
/// [`RenderPass::step`](crate::RenderPass::step)) and this returns `None`.
pub fn partition(len: usize, policy: BatchPolicy) -> Option<FixedBatches> {
    match policy {
        BatchPolicy::FixedSize(size) => Some(FixedBatches {
            next: 0,
            len,
            size: size.get(),
        }),
        BatchPolicy::TimeBoxed(_) => None,
    }
}

/// Iterator over fixed-size batch ranges, returned by [`partition`].
#[derive(Clone, Debug)]
pub struct FixedBatches {
    next: usize,
    len: usize,
    size: usize,
}

impl Iterator for FixedBatches {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.next >= self.len {
            return None;
        }
        let start = self.next;
        self.next = start.saturating_add(self.size).min(self.len);
        Some(start..self.next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.len - self.next).div_ceil(self.size);
        (n, Some(n))
    }
}

impl ExactSizeIterator for FixedBatches {}
