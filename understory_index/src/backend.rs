// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for bulk-built spatial indexing implementations.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::Aabb2D;

/// Spatial backend abstraction used by [`Index`](crate::Index).
///
/// Backends are built in one go from the complete set of boxes and are never
/// mutated afterwards. Slots are positions in the slice given to
/// [`Backend::build`]; the backend reports matches by slot and leaves it to the
/// caller to map slots back to keys.
pub trait Backend<T>: Debug
where
    T: Copy + PartialOrd + Debug,
{
    /// Bulk-construct the backend over `boxes`.
    fn build(boxes: &[Aabb2D<T>]) -> Self
    where
        Self: Sized;

    /// Number of slots the backend was built over.
    fn len(&self) -> usize;

    /// Returns `true` if the backend holds no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit slots whose AABB contains the point.
    fn visit_point<F: FnMut(usize)>(&self, x: T, y: T, f: F);

    /// Visit slots whose AABB intersects the rectangle.
    ///
    /// Every matching slot is visited exactly once, in no particular order.
    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, f: F);

    /// Query slots whose AABB intersects the rectangle. Default: collects `visit_rect`.
    fn query_rect(&self, rect: Aabb2D<T>) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_rect(rect, |i| out.push(i));
        out
    }
}
