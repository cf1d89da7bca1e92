// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend over `f64` coordinates.

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Upper bound on grid cells per axis.
const MAX_CELLS_PER_AXIS: usize = 1024;

type Cell = (i64, i64);

/// Uniform grid backend.
///
/// The grid covers the extent of all boxes with roughly one cell per box.
/// Each box is registered in every cell it overlaps; only occupied cells are
/// stored. Works well for many small, evenly spread boxes (such as short line
/// segments); degrades towards a linear scan for a few very large boxes.
#[derive(Clone, Default)]
pub struct Grid {
    boxes: Vec<Aabb2D<f64>>,
    extent: Option<Aabb2D<f64>>,
    cell_w: f64,
    cell_h: f64,
    cols: i64,
    rows: i64,
    cells: HashMap<Cell, SmallVec<[u32; 8]>>,
}

impl core::fmt::Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Grid")
            .field("len", &self.boxes.len())
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .field("occupied_cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl Grid {
    fn cell_of(&self, x: f64, y: f64) -> Cell {
        let Some(ext) = self.extent else {
            return (0, 0);
        };
        let cx = floor_to_i64((x - ext.min_x) / self.cell_w);
        let cy = floor_to_i64((y - ext.min_y) / self.cell_h);
        (cx.clamp(0, self.cols - 1), cy.clamp(0, self.rows - 1))
    }
}

/// `floor` without `std`; saturates for out-of-range inputs.
fn floor_to_i64(v: f64) -> i64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "cell coordinates are clamped to the grid immediately after"
    )]
    let t = v as i64;
    if (t as f64) > v { t - 1 } else { t }
}

impl Backend<f64> for Grid {
    fn build(boxes: &[Aabb2D<f64>]) -> Self {
        let Some(first) = boxes.first() else {
            return Self::default();
        };
        let extent = boxes[1..].iter().fold(*first, |acc, b| acc.union(b));

        let mut side = 1_usize;
        while side * side < boxes.len() && side < MAX_CELLS_PER_AXIS {
            side += 1;
        }
        let side_i = side as i64;
        let side_f = side as f64;
        let cell_w = if extent.width() > 0.0 {
            extent.width() / side_f
        } else {
            1.0
        };
        let cell_h = if extent.height() > 0.0 {
            extent.height() / side_f
        } else {
            1.0
        };

        let mut grid = Self {
            boxes: boxes.to_vec(),
            extent: Some(extent),
            cell_w,
            cell_h,
            cols: side_i,
            rows: side_i,
            cells: HashMap::new(),
        };

        for (slot, b) in boxes.iter().enumerate() {
            let Ok(slot) = u32::try_from(slot) else {
                break;
            };
            if b.is_empty() {
                continue;
            }
            let (x0, y0) = grid.cell_of(b.min_x, b.min_y);
            let (x1, y1) = grid.cell_of(b.max_x, b.max_y);
            for cy in y0..=y1 {
                for cx in x0..=x1 {
                    grid.cells.entry((cx, cy)).or_default().push(slot);
                }
            }
        }
        grid
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn visit_point<F: FnMut(usize)>(&self, x: f64, y: f64, mut f: F) {
        match self.extent {
            Some(ext) if ext.contains_point(x, y) => {}
            _ => return,
        }
        if let Some(slots) = self.cells.get(&self.cell_of(x, y)) {
            for &slot in slots {
                let slot = slot as usize;
                if self.boxes[slot].contains_point(x, y) {
                    f(slot);
                }
            }
        }
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<f64>, mut f: F) {
        match self.extent {
            Some(ext) if ext.intersects(&rect) => {}
            _ => return,
        }
        let (x0, y0) = self.cell_of(rect.min_x, rect.min_y);
        let (x1, y1) = self.cell_of(rect.max_x, rect.max_y);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                let Some(slots) = self.cells.get(&(cx, cy)) else {
                    continue;
                };
                for &slot in slots {
                    let slot = slot as usize;
                    let b = &self.boxes[slot];
                    if !b.intersects(&rect) {
                        continue;
                    }
                    // A box spanning several cells is reported only from the
                    // cell holding the min corner of its overlap with `rect`.
                    let rx = if b.min_x > rect.min_x { b.min_x } else { rect.min_x };
                    let ry = if b.min_y > rect.min_y { b.min_y } else { rect.min_y };
                    if self.cell_of(rx, ry) == (cx, cy) {
                        f(slot);
                    }
                }
            }
        }
    }
}
