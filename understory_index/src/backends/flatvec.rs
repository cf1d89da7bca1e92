// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Flat vector backend with linear scans.
///
/// Queries are `O(n)`. This is the reference behavior the other backends are
/// tested against.
pub struct FlatVec<T: Copy + PartialOrd + Debug> {
    entries: Vec<Aabb2D<T>>,
}

impl<T: Copy + PartialOrd + Debug> Default for FlatVec<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Copy + PartialOrd + Debug> Debug for FlatVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd + Debug> Backend<T> for FlatVec<T> {
    fn build(boxes: &[Aabb2D<T>]) -> Self {
        Self {
            entries: boxes.to_vec(),
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn visit_point<F: FnMut(usize)>(&self, x: T, y: T, mut f: F) {
        for (i, a) in self.entries.iter().enumerate() {
            if a.contains_point(x, y) {
                f(i);
            }
        }
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, mut f: F) {
        for (i, a) in self.entries.iter().enumerate() {
            if a.intersects(&rect) {
                f(i);
            }
        }
    }
}
