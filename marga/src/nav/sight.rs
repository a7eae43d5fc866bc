//! Line-of-sight queries.
//!
//! Grid visibility is a conservative supercover test: every cell whose
//! closed unit square touches the segment between two cell centers must be
//! in bounds and unblocked. Segments grazing a blocked corner are therefore
//! not clear. The walk uses exact integer arithmetic, so there is no
//! floating point drift on long segments.

use super::{NavModel, NodeIndex, Topology};
use crate::core::GridCoord;

impl NavModel {
    /// True if an agent can travel straight from `from` to `to`.
    ///
    /// Graph nodes are only visible to each other through a direct edge.
    pub fn line_of_sight(&self, from: NodeIndex, to: NodeIndex) -> bool {
        if self.is_blocked(from) || self.is_blocked(to) {
            return false;
        }
        match &self.topology {
            Topology::Grid { .. } => {
                let (Some(a), Some(b)) = (self.coord(from), self.coord(to)) else {
                    return false;
                };
                supercover(a, b, |cell| {
                    self.index_of(cell).is_some_and(|i| !self.is_blocked(i))
                })
            }
            Topology::Graph { adjacency, .. } => {
                from == to || adjacency[from].iter().any(|e| e.to == to)
            }
        }
    }
}

/// Visit every cell whose closed square intersects segment `a`-`b`.
///
/// Stops early and returns false as soon as `visit` rejects a cell.
fn supercover<F>(a: GridCoord, b: GridCoord, mut visit: F) -> bool
where
    F: FnMut(GridCoord) -> bool,
{
    let dx = (b.x as i64 - a.x as i64).abs();
    let dy = (b.y as i64 - a.y as i64).abs();

    // Walk along the major axis; `major`/`minor` map back to (x, y)
    let steep = dy > dx;
    let (mut a0, mut a1, mut b0, mut b1) = if steep {
        (a.y as i64, a.x as i64, b.y as i64, b.x as i64)
    } else {
        (a.x as i64, a.y as i64, b.x as i64, b.y as i64)
    };
    if b0 < a0 {
        std::mem::swap(&mut a0, &mut b0);
        std::mem::swap(&mut a1, &mut b1);
    }

    let run = b0 - a0;
    let rise = b1 - a1;
    let to_cell = |major: i64, minor: i64| {
        if steep {
            GridCoord::new(minor as i32, major as i32)
        } else {
            GridCoord::new(major as i32, minor as i32)
        }
    };

    if run == 0 {
        return visit(to_cell(a0, a1));
    }

    // Work in half-cell units scaled by 2*run so every boundary is an integer:
    // minor(m) * 2run = 2run*a1 + (2m - 2a0) * rise
    let denom = 2 * run;
    for column in a0..=b0 {
        let lo = (2 * column - 1).max(2 * a0);
        let hi = (2 * column + 1).min(2 * b0);
        let at = |m2: i64| denom * a1 + (m2 - 2 * a0) * rise;
        let (n_lo, n_hi) = {
            let (p, q) = (at(lo), at(hi));
            (p.min(q), p.max(q))
        };

        // Cells k with [k - 1/2, k + 1/2] overlapping [n_lo, n_hi] / denom
        let first = div_ceil(n_lo - run, denom);
        let last = (n_hi + run).div_euclid(denom);
        for minor in first..=last {
            if !visit(to_cell(column, minor)) {
                return false;
            }
        }
    }
    true
}

#[inline]
fn div_ceil(n: i64, d: i64) -> i64 {
    -((-n).div_euclid(d))
}
