// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static R-tree packed with the sort-tile-recursive (STR) bulk-loading algorithm.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::Range;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Maximum number of children per node.
const NODE_CAPACITY: usize = 16;

#[derive(Clone, Debug)]
struct Node<T> {
    aabb: Aabb2D<T>,
    /// Range into the level below (or into `items` for the lowest level).
    children: Range<usize>,
}

/// Read-only R-tree bulk-loaded with sort-tile-recursive packing.
///
/// Building is `O(n log n)` (dominated by the sorts); rectangle queries touch
/// `O(log n + k)` nodes for well-distributed data. The tree cannot be edited
/// after construction; build a new one when the box set changes.
#[derive(Clone)]
pub struct PackedRTree<T: Copy + PartialOrd + Debug> {
    /// Leaf items in packed order: `(aabb, slot)`.
    items: Vec<(Aabb2D<T>, usize)>,
    /// `levels[0]` groups `items`; `levels[k]` groups `levels[k - 1]`.
    /// The last level holds exactly one root node when the tree is non-empty.
    levels: Vec<Vec<Node<T>>>,
}

impl<T: Copy + PartialOrd + Debug> Default for PackedRTree<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            levels: Vec::new(),
        }
    }
}

impl<T: Copy + PartialOrd + Debug> Debug for PackedRTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PackedRTree")
            .field("len", &self.items.len())
            .field("height", &self.levels.len())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd + Debug> PackedRTree<T> {
    /// Number of node levels above the leaf items.
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    fn visit_nodes<P, F>(&self, prune: P, mut f: F)
    where
        P: Fn(&Aabb2D<T>) -> bool,
        F: FnMut(usize),
    {
        let Some(top) = self.levels.last() else {
            return;
        };
        let mut stack: Vec<(usize, usize)> = Vec::new();
        let top_level = self.levels.len() - 1;
        for i in 0..top.len() {
            stack.push((top_level, i));
        }
        while let Some((level, idx)) = stack.pop() {
            let node = &self.levels[level][idx];
            if !prune(&node.aabb) {
                continue;
            }
            if level == 0 {
                for (aabb, slot) in &self.items[node.children.clone()] {
                    if prune(aabb) {
                        f(*slot);
                    }
                }
            } else {
                for child in node.children.clone() {
                    stack.push((level - 1, child));
                }
            }
        }
    }
}

impl<T: Copy + PartialOrd + Debug> Backend<T> for PackedRTree<T> {
    fn build(boxes: &[Aabb2D<T>]) -> Self {
        if boxes.is_empty() {
            return Self::default();
        }

        let mut items: Vec<(Aabb2D<T>, usize)> =
            boxes.iter().copied().enumerate().map(|(i, a)| (a, i)).collect();
        str_sort(&mut items, |item| &item.0);

        let mut levels = Vec::new();
        let mut level = group(&items, |item| item.0);
        while level.len() > 1 {
            str_sort(&mut level, |node| &node.aabb);
            let parents = group(&level, |node| node.aabb);
            levels.push(level);
            level = parents;
        }
        levels.push(level);

        Self { items, levels }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn visit_point<F: FnMut(usize)>(&self, x: T, y: T, f: F) {
        self.visit_nodes(|a| a.contains_point(x, y), f);
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, f: F) {
        self.visit_nodes(|a| a.intersects(&rect), f);
    }
}

/// Orders `v` into vertical strips by `min_x`, then each strip by `min_y`, so
/// that consecutive runs of [`NODE_CAPACITY`] elements are spatially compact.
fn str_sort<T, E, A>(v: &mut [E], aabb: A)
where
    T: Copy + PartialOrd + Debug,
    A: Fn(&E) -> &Aabb2D<T>,
{
    let leaf_count = v.len().div_ceil(NODE_CAPACITY);
    let mut strips = 1;
    while strips * strips < leaf_count {
        strips += 1;
    }
    let strip_len = strips * NODE_CAPACITY;

    v.sort_by(|a, b| cmp(aabb(a).min_x, aabb(b).min_x));
    for strip in v.chunks_mut(strip_len) {
        strip.sort_by(|a, b| cmp(aabb(a).min_y, aabb(b).min_y));
    }
}

fn group<T, E, A>(v: &[E], aabb: A) -> Vec<Node<T>>
where
    T: Copy + PartialOrd + Debug,
    A: Fn(&E) -> Aabb2D<T>,
{
    let mut out = Vec::with_capacity(v.len().div_ceil(NODE_CAPACITY));
    let mut start = 0;
    for chunk in v.chunks(NODE_CAPACITY) {
        let mut bounds = aabb(&chunk[0]);
        for e in &chunk[1..] {
            bounds = bounds.union(&aabb(e));
        }
        out.push(Node {
            aabb: bounds,
            children: start..start + chunk.len(),
        });
        start += chunk.len();
    }
    out
}

/// Total order for sorting: unordered values (NaN) sort after everything else.
#[inline]
fn cmp<T: PartialOrd>(a: T, b: T) -> Ordering {
    let ordered = |v: &T| v.partial_cmp(v).is_some();
    match (ordered(&a), ordered(&b)) {
        (true, true) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (a_ok, b_ok) => b_ok.cmp(&a_ok),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::backends::flatvec::FlatVec;

    fn scattered(n: usize) -> Vec<Aabb2D<f64>> {
        // Deterministic xorshift so the test does not depend on a RNG crate.
        let mut s: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            s ^= s << 13;
            s ^= s >> 7;
            s ^= s << 17;
            (s >> 11) as f64 / (1_u64 << 53) as f64
        };
        (0..n)
            .map(|_| {
                let x = next() * 1000.0;
                let y = next() * 1000.0;
                Aabb2D::from_corners((x, y), (x + next() * 20.0 - 10.0, y + next() * 20.0))
            })
            .collect()
    }

    #[test]
    fn empty_tree_has_no_levels() {
        let t = PackedRTree::<f64>::build(&[]);
        assert_eq!(t.height(), 0);
        assert!(t.query_rect(Aabb2D::new(0.0, 0.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn single_item_tree() {
        let t = PackedRTree::build(&[Aabb2D::new(1.0, 1.0, 2.0, 2.0)]);
        assert_eq!(t.height(), 1);
        assert_eq!(t.query_rect(Aabb2D::new(2.0, 2.0, 3.0, 3.0)), [0]);
    }

    #[test]
    fn matches_linear_scan() {
        let boxes = scattered(2_000);
        let tree = PackedRTree::build(&boxes);
        let flat = FlatVec::build(&boxes);
        assert!(tree.height() >= 3);

        for q in scattered(50) {
            let q = Aabb2D::new(q.min_x, q.min_y, q.max_x + 40.0, q.max_y + 40.0);
            let mut a = tree.query_rect(q);
            let mut b = flat.query_rect(q);
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn nan_box_does_not_hide_its_neighbors() {
        let mut boxes = vec![Aabb2D::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN)];
        boxes.extend((1..16).map(|i| {
            let x = f64::from(i) * 10.0;
            Aabb2D::new(x, 0.0, x + 5.0, 0.0)
        }));
        let tree = PackedRTree::build(&boxes);
        let flat = FlatVec::build(&boxes);
        let q = Aabb2D::new(0.0, -1.0, 1000.0, 1.0);
        let mut a = tree.query_rect(q);
        a.sort_unstable();
        assert_eq!(a, flat.query_rect(q));
        assert_eq!(a, (1..16).collect::<Vec<_>>());
    }

    #[test]
    fn point_queries_match_linear_scan() {
        let boxes = scattered(500);
        let tree = PackedRTree::build(&boxes);
        let flat = FlatVec::build(&boxes);
        for b in boxes.iter().take(40) {
            let (x, y) = (b.min_x, b.max_y);
            let mut a = Vec::new();
            tree.visit_point(x, y, |i| a.push(i));
            let mut e = Vec::new();
            flat.visit_point(x, y, |i| e.push(i));
            a.sort_unstable();
            e.sort_unstable();
            assert_eq!(a, e);
        }
    }
}
