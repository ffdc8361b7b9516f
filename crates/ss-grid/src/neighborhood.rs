//! Cardinal-direction vision.
//!
//! Agents see along the four cardinal directions only, up to `vision`
//! cells away.  On a torus a long enough line of sight wraps back onto
//! cells already seen (or onto the origin); those are reported once.

use rustc_hash::FxHashSet;

use ss_core::CellId;

use crate::Grid;

const DIRECTIONS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// The cell `dist` steps from `from` along `(dx, dy)`, or `None` if that
/// leaves a non-wrapping grid.
pub fn offset(grid: &Grid, from: CellId, (dx, dy): (i64, i64), dist: u32) -> Option<CellId> {
    let pos = grid.pos(from);
    let (w, h) = (grid.width as i64, grid.height as i64);
    let mut x = pos.x as i64 + dx * dist as i64;
    let mut y = pos.y as i64 + dy * dist as i64;
    if grid.wraparound {
        x = x.rem_euclid(w);
        y = y.rem_euclid(h);
    } else if x < 0 || y < 0 || x >= w || y >= h {
        return None;
    }
    Some(CellId((y * w + x) as u32))
}

/// Every cell visible from `origin` within `vision`, excluding `origin`.
pub fn visible_cells(grid: &Grid, origin: CellId, vision: u32) -> Vec<CellId> {
    let mut seen: FxHashSet<CellId> = FxHashSet::default();
    let mut out = Vec::with_capacity(vision as usize * 4);
    for dir in DIRECTIONS {
        for dist in 1..=vision {
            let Some(cell) = offset(grid, origin, dir, dist) else { break };
            if cell != origin && seen.insert(cell) {
                out.push(cell);
            }
        }
    }
    out
}

/// Number of cells visible from `origin`; the size of the neighbourhood an
/// agent would have if it stood there.
#[inline]
pub fn neighborhood_size(grid: &Grid, origin: CellId, vision: u32) -> usize {
    visible_cells(grid, origin, vision).len()
}

/// The up-to-four cells directly adjacent to `cell`.
pub fn adjacent(grid: &Grid, cell: CellId) -> Vec<CellId> {
    visible_cells(grid, cell, 1)
}

/// Combined sugar and spice of the cells adjacent to `cell`.
pub fn neighbor_wealth(grid: &Grid, cell: CellId) -> f64 {
    adjacent(grid, cell).into_iter().map(|c| grid.site_wealth(c)).sum()
}

/// Cardinal distance between two cells, honouring wraparound.  `None` when
/// they share neither a row nor a column.
pub fn cardinal_distance(grid: &Grid, a: CellId, b: CellId) -> Option<u32> {
    let (pa, pb) = (grid.pos(a), grid.pos(b));
    let span = |p: u32, q: u32, extent: u32| {
        let d = p.abs_diff(q);
        if grid.wraparound { d.min(extent - d) } else { d }
    };
    if pa.y == pb.y {
        Some(span(pa.x, pb.x, grid.width))
    } else if pa.x == pb.x {
        Some(span(pa.y, pb.y, grid.height))
    } else {
        None
    }
}

/// `true` if an agent on `from` with the given range can reach `to` in a
/// single step.  Staying put is always possible.
pub fn can_reach(grid: &Grid, from: CellId, to: CellId, range: u32) -> bool {
    from == to || cardinal_distance(grid, from, to).is_some_and(|d| d <= range)
}
