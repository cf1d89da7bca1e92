// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_index --heading-base-level=0

//! Understory Index: a static 2D AABB index for proximity queries.
//!
//! The index answers "which boxes intersect this rectangle?" over a fixed set
//! of axis-aligned bounding boxes. It is built in bulk from the complete set
//! of entries and never edited in place: when the underlying items change,
//! build a new [`Index`] and swap it in. A query therefore never observes a
//! half-built index.
//!
//! - [`Aabb2D`]: closed axis-aligned box; touching edges count as overlap.
//! - [`Entry`]: a box plus a caller-owned key (usually a position in a
//!   collection the caller keeps).
//! - [`Backend`]: pluggable spatial structure. Built-ins are
//!   [`PackedRTree`] (default), [`FlatVec`], and [`Grid`] (behind the
//!   `backend_grid` feature).
//!
//! ## Example
//!
//! ```rust
//! use understory_index::{Aabb2D, Entry, Index};
//!
//! let index: Index<usize> = Index::build([
//!     Entry { aabb: Aabb2D::from_corners((0.0, 0.0), (10.0, 0.0)), key: 0 },
//!     Entry { aabb: Aabb2D::from_corners((100.0, 100.0), (110.0, 100.0)), key: 1 },
//! ]);
//!
//! let hits: Vec<usize> = index
//!     .query(Aabb2D::new(0.0, -4.0, 10.0, 6.0))
//!     .into_iter()
//!     .map(|e| e.key)
//!     .collect();
//! assert_eq!(hits, [0]);
//!
//! // An index that was never built is simply empty.
//! assert!(Index::<usize>::default().query(Aabb2D::new(0.0, 0.0, 1.0, 1.0)).is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod types;

use alloc::vec::Vec;
use core::fmt::Debug;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
#[cfg(feature = "backend_grid")]
pub use backends::grid::Grid;
pub use backends::packed_rtree::PackedRTree;
pub use types::{Aabb2D, Entry};

/// Bulk-built spatial index over [`Entry`] values.
///
/// Results are returned in entry order (the order given to [`Index::build`]),
/// independent of the backend, so callers get deterministic output.
pub struct Index<K, T = f64, B = PackedRTree<T>>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T>,
{
    entries: Vec<Entry<K, T>>,
    backend: B,
    extent: Option<Aabb2D<T>>,
}

/// An [`Index`] backed by a linear scan.
pub type FlatIndex<K> = Index<K, f64, FlatVec<f64>>;

/// An [`Index`] backed by a uniform grid.
#[cfg(feature = "backend_grid")]
pub type GridIndex<K> = Index<K, f64, Grid>;

impl<K, T, B> Default for Index<K, T, B>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T>,
{
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            backend: B::build(&[]),
            extent: None,
        }
    }
}

impl<K, T, B> Debug for Index<K, T, B>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Index")
            .field("len", &self.entries.len())
            .field("extent", &self.extent)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl<K, T, B> Index<K, T, B>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T>,
{
    /// Builds an index over all `entries`.
    ///
    /// Entries with an empty box (one with a NaN coordinate, for instance) are
    /// kept but never match a query and do not widen the extent.
    ///
    /// Cost depends on the backend; the default [`PackedRTree`] is `O(n log n)`.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Entry<K, T>>,
    {
        let entries: Vec<Entry<K, T>> = entries.into_iter().collect();
        let boxes: Vec<Aabb2D<T>> = entries.iter().map(|e| e.aabb).collect();
        let extent = boxes
            .split_first()
            .map(|(first, rest)| rest.iter().fold(*first, |acc, b| acc.union(b)))
            .filter(|extent| !extent.is_empty());
        Self {
            backend: B::build(&boxes),
            entries,
            extent,
        }
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union of all non-empty indexed boxes, or `None` when there are none.
    pub fn extent(&self) -> Option<Aabb2D<T>> {
        self.extent
    }

    /// All entries in build order.
    pub fn entries(&self) -> &[Entry<K, T>] {
        &self.entries
    }

    /// Backend used for queries.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns every entry whose box intersects `rect`, in build order.
    pub fn query(&self, rect: Aabb2D<T>) -> Vec<&Entry<K, T>> {
        let mut slots = self.backend.query_rect(rect);
        slots.sort_unstable();
        slots.into_iter().map(|s| &self.entries[s]).collect()
    }

    /// Returns every entry whose box contains the point, in build order.
    pub fn query_point(&self, x: T, y: T) -> Vec<&Entry<K, T>> {
        let mut slots = Vec::new();
        self.backend.visit_point(x, y, |s| slots.push(s));
        slots.sort_unstable();
        slots.into_iter().map(|s| &self.entries[s]).collect()
    }

    /// Visits every entry whose box intersects `rect`, in backend order.
    ///
    /// Use this over [`Index::query`] when order does not matter and the
    /// allocation of the result vector should be avoided.
    pub fn visit_rect<F: FnMut(&Entry<K, T>)>(&self, rect: Aabb2D<T>, mut f: F) {
        self.backend.visit_rect(rect, |s| f(&self.entries[s]));
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn segments(n: usize) -> Vec<Entry<usize>> {
        (0..n)
            .map(|i| {
                let x = (i % 97) as f64 * 7.0;
                let y = (i / 97) as f64 * 3.0;
                Entry {
                    aabb: Aabb2D::from_corners((x, y), (x + 5.0, y - 2.0)),
                    key: i,
                }
            })
            .collect()
    }

    fn full_extent_round_trip<B: Backend<f64>>(n: usize) {
        let index: Index<usize, f64, B> = Index::build(segments(n));
        assert_eq!(index.len(), n);
        let Some(extent) = index.extent() else {
            assert_eq!(n, 0, "only an empty index has no extent");
            return;
        };
        let keys: Vec<usize> = index.query(extent).into_iter().map(|e| e.key).collect();
        assert_eq!(keys, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn querying_full_extent_returns_everything() {
        for n in [0, 1, 2, 15, 16, 17, 255, 1_000, 5_000] {
            full_extent_round_trip::<PackedRTree<f64>>(n);
            full_extent_round_trip::<FlatVec<f64>>(n);
            #[cfg(feature = "backend_grid")]
            full_extent_round_trip::<Grid>(n);
        }
    }

    #[test]
    fn unbuilt_index_is_empty() {
        let index = Index::<usize>::default();
        assert!(index.is_empty());
        assert!(index.extent().is_none());
        assert!(index.query(Aabb2D::new(-1e9, -1e9, 1e9, 1e9)).is_empty());
        assert!(index.query_point(0.0, 0.0).is_empty());
    }

    #[test]
    fn rebuild_replaces_previous_entries() {
        let mut index: Index<usize> = Index::build(segments(10));
        assert_eq!(index.query(Aabb2D::new(0.0, -10.0, 70.0, 10.0)).len(), 10);
        index = Index::build([Entry {
            aabb: Aabb2D::new(500.0, 500.0, 501.0, 501.0),
            key: 99,
        }]);
        assert_eq!(index.len(), 1);
        assert!(index.query(Aabb2D::new(0.0, -10.0, 70.0, 10.0)).is_empty());
        let hits: Vec<_> = index.query_point(500.5, 500.5).into_iter().map(|e| e.key).collect();
        assert_eq!(hits, [99]);
    }

    fn nan_entry_round_trip<B: Backend<f64>>() -> Vec<usize> {
        let nan = Entry {
            aabb: Aabb2D::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN),
            key: 0,
        };
        let valid = (1..16).map(|i| {
            let x = i as f64 * 10.0;
            Entry {
                aabb: Aabb2D::new(x, 0.0, x + 5.0, 0.0),
                key: i,
            }
        });
        let index: Index<usize, f64, B> = Index::build(core::iter::once(nan).chain(valid));
        assert_eq!(index.len(), 16);
        assert_eq!(index.extent(), Some(Aabb2D::new(10.0, 0.0, 155.0, 0.0)));
        index
            .query(Aabb2D::new(0.0, -1.0, 1000.0, 1.0))
            .into_iter()
            .map(|e| e.key)
            .collect()
    }

    #[test]
    fn nan_entry_is_skipped_by_every_backend() {
        let expected: Vec<usize> = (1..16).collect();
        assert_eq!(nan_entry_round_trip::<PackedRTree<f64>>(), expected);
        assert_eq!(nan_entry_round_trip::<FlatVec<f64>>(), expected);
        #[cfg(feature = "backend_grid")]
        assert_eq!(nan_entry_round_trip::<Grid>(), expected);
        let only_nan: Index<usize> = Index::build([Entry {
            aabb: Aabb2D::new(f64::NAN, 0.0, 1.0, 1.0),
            key: 7,
        }]);
        assert!(only_nan.extent().is_none());
        assert!(only_nan.query_point(0.5, 0.5).is_empty());
    }

    #[test]
    fn visit_rect_matches_query() {
        let index: Index<usize> = Index::build(segments(400));
        let q = Aabb2D::new(100.0, 0.0, 200.0, 6.0);
        let mut visited = Vec::new();
        index.visit_rect(q, |e| visited.push(e.key));
        visited.sort_unstable();
        let queried: Vec<_> = index.query(q).into_iter().map(|e| e.key).collect();
        assert_eq!(visited, queried);
        assert!(!queried.is_empty());
    }
}
