//! Per-tick landscape updates: regrowth and pollution.

use ss_core::{CellId, Tick};

use crate::Grid;
use crate::neighborhood::adjacent;

/// Grow every cell back towards capacity by the environment's regrow rates
/// and update the running global maxima.
pub fn regrow(grid: &mut Grid) {
    let (sr, pr) = (grid.environment.sugar_regrow_rate, grid.environment.spice_regrow_rate);
    for i in 0..grid.cell_count() {
        grid.sugar[i] = (grid.sugar[i] + sr).min(grid.max_sugar[i]);
        grid.spice[i] = (grid.spice[i] + pr).min(grid.max_spice[i]);
        grid.environment.observe(grid.sugar[i], grid.spice[i]);
    }
}

/// Add pollution to one cell.  Negative amounts are ignored.
#[inline]
pub fn pollute(grid: &mut Grid, cell: CellId, amount: f64) {
    if amount > 0.0 {
        grid.pollution[cell.index()] += amount;
    }
}

/// Replace every cell's pollution with the mean over its adjacent cells.
pub fn diffuse_pollution(grid: &mut Grid) {
    let next: Vec<f64> = grid
        .cells()
        .map(|cell| {
            let around = adjacent(grid, cell);
            if around.is_empty() {
                grid.pollution[cell.index()]
            } else {
                around.iter().map(|c| grid.pollution[c.index()]).sum::<f64>() / around.len() as f64
            }
        })
        .collect();
    grid.pollution = next;
}

/// End-of-tick landscape update: regrowth every tick, diffusion on the
/// configured period.
pub fn advance(grid: &mut Grid, tick: Tick) {
    regrow(grid);
    let period = grid.environment.pollution_diffusion_period;
    if period > 0 && tick.0 > 0 && tick.0.is_multiple_of(period) {
        diffuse_pollution(grid);
    }
}
