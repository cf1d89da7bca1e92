// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};
use understory_index::{Backend, Index};
use understory_precise_hit::{HitParams, PreciseHitTest, StrokedLine};

use crate::mappings::Mappings;
use crate::segment::Segment;

/// Finds the segments within `params.stroke_tolerance` of `pointer`.
///
/// `pointer` is in surface space. The square `pointer ± tolerance` is mapped
/// into domain space through `mappings` and used as a cheap bounding-box
/// pre-filter on `index`. Each candidate is then mapped onto the surface and
/// kept if its distance to the pointer is at most the tolerance.
///
/// Returns keys (positions in `segments`) in index build order. An empty
/// index yields an empty result.
pub fn hit_test<B>(
    index: &Index<usize, f64, B>,
    segments: &[Segment],
    mappings: &Mappings,
    pointer: Point,
    params: &HitParams,
) -> Vec<usize>
where
    B: Backend<f64>,
{
    let tol = params.stroke_tolerance;
    let window = Rect::new(pointer.x - tol, pointer.y - tol, pointer.x + tol, pointer.y + tol);
    let query = mappings.surface_rect_to_domain(window);

    let candidates = index.query(query);
    let considered = candidates.len();
    let mut hits = Vec::with_capacity(considered);
    for entry in candidates {
        let Some(seg) = segments.get(entry.key) else {
            continue;
        };
        let line = StrokedLine::hairline(mappings.to_surface(seg.p1), mappings.to_surface(seg.p2));
        if line.hit_test_local(pointer, params).is_some() {
            hits.push(entry.key);
        }
    }
    tracing::trace!(?pointer, candidates = considered, hits = hits.len(), "hit test");
    hits
}

/// Surface-space bounding rectangle of the given segments.
pub fn surface_bounds(segments: &[Segment], keys: &[usize], mappings: &Mappings) -> Option<Rect> {
    keys.iter()
        .filter_map(|&k| segments.get(k))
        .map(|s| Rect::from_points(mappings.to_surface(s.p1), mappings.to_surface(s.p2)))
        .reduce(|a, b| a.union(b))
}
