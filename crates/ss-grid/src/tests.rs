//! Unit tests for ss-grid.

#[cfg(test)]
mod helpers {
    use crate::{Grid, GridBuilder, GridPos};

    /// A single row of `width` cells with the given sugar levels.
    pub fn row(sugar: &[f64], wrap: bool) -> Grid {
        let mut b = GridBuilder::new(sugar.len() as u32, 1).wraparound(wrap);
        for (x, &s) in sugar.iter().enumerate() {
            b = b.sugar(GridPos::new(x as u32, 0), s);
        }
        b.build().unwrap()
    }
}

// ── Builder & addressing ──────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ss_core::{AgentId, CellId};

    use crate::{GridBuilder, GridError, GridPos};

    #[test]
    fn zero_dimension_rejected() {
        assert!(matches!(
            GridBuilder::new(0, 4).build(),
            Err(GridError::EmptyGrid { width: 0, height: 4 })
        ));
    }

    #[test]
    fn row_major_addressing() {
        let grid = GridBuilder::new(4, 3).build().unwrap();
        assert_eq!(grid.cell_count(), 12);
        let c = grid.cell_at(GridPos::new(1, 2)).unwrap();
        assert_eq!(c, CellId(9));
        assert_eq!(grid.pos(c), GridPos::new(1, 2));
        assert!(grid.cell_at(GridPos::new(4, 0)).is_none());
    }

    #[test]
    fn initial_levels_feed_global_maxima() {
        let grid = GridBuilder::new(2, 2)
            .sugar(GridPos::new(0, 0), 3.0)
            .spice(GridPos::new(1, 1), 7.0)
            .build()
            .unwrap();
        assert_eq!(grid.environment.global_max_sugar, 3.0);
        assert_eq!(grid.environment.global_max_spice, 7.0);
        assert_eq!(grid.environment.global_max_wealth(), 10.0);
    }

    #[test]
    fn peak_is_capped_and_centred() {
        let grid = GridBuilder::new(10, 10)
            .sugar_peak(GridPos::new(3, 7), 8.0, 4.0)
            .build()
            .unwrap();
        let centre = grid.cell_at(GridPos::new(3, 7)).unwrap();
        assert_eq!(grid.max_sugar[centre.index()], 4.0);
        assert_eq!(grid.sugar[centre.index()], 4.0);
        assert!(grid.max_sugar.iter().all(|&s| s <= 4.0));
        let far = grid.cell_at(GridPos::new(9, 0)).unwrap();
        assert!(grid.max_sugar[far.index()] < 4.0);
    }

    #[test]
    fn place_rejects_second_occupant() {
        let mut grid = GridBuilder::new(2, 1).build().unwrap();
        grid.place(CellId(0), AgentId(0)).unwrap();
        // Re-placing the same agent is fine.
        grid.place(CellId(0), AgentId(0)).unwrap();
        assert!(matches!(
            grid.place(CellId(0), AgentId(1)),
            Err(GridError::Occupied { occupant: AgentId(0), .. })
        ));
        assert_eq!(grid.vacate(CellId(0)), Some(AgentId(0)));
        assert_eq!(grid.empty_cells(), vec![CellId(0), CellId(1)]);
    }

    #[test]
    fn harvest_empties_cell() {
        let mut grid = super::helpers::row(&[0.0, 5.0], false);
        assert_eq!(grid.harvest(CellId(1)), (5.0, 0.0));
        assert_eq!(grid.site_wealth(CellId(1)), 0.0);
        assert_eq!(grid.max_site_wealth(CellId(1)), 5.0);
    }
}

// ── Neighborhoods ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod neighborhood {
    use ss_core::CellId;

    use crate::neighborhood::{adjacent, can_reach, neighbor_wealth, visible_cells};
    use crate::{GridBuilder, GridPos};

    use super::helpers::row;

    #[test]
    fn corner_vision_is_clipped() {
        let grid = GridBuilder::new(5, 5).build().unwrap();
        let origin = grid.cell_at(GridPos::new(0, 0)).unwrap();
        let mut seen = visible_cells(&grid, origin, 2);
        seen.sort();
        assert_eq!(seen, vec![CellId(1), CellId(2), CellId(5), CellId(10)]);
    }

    #[test]
    fn centre_vision_sees_four_lines() {
        let grid = GridBuilder::new(7, 7).build().unwrap();
        let origin = grid.cell_at(GridPos::new(3, 3)).unwrap();
        assert_eq!(visible_cells(&grid, origin, 3).len(), 12);
        assert!(!visible_cells(&grid, origin, 3).contains(&origin));
    }

    #[test]
    fn torus_vision_is_deduplicated() {
        let grid = row(&[0.0; 3], true);
        let mut seen = visible_cells(&grid, CellId(0), 2);
        seen.sort();
        assert_eq!(seen, vec![CellId(1), CellId(2)]);
    }

    #[test]
    fn zero_vision_sees_nothing() {
        let grid = row(&[0.0; 3], false);
        assert!(visible_cells(&grid, CellId(1), 0).is_empty());
    }

    #[test]
    fn reachability_follows_cardinal_lines() {
        let grid = GridBuilder::new(5, 5).build().unwrap();
        let a = grid.cell_at(GridPos::new(0, 0)).unwrap();
        let b = grid.cell_at(GridPos::new(3, 0)).unwrap();
        let diag = grid.cell_at(GridPos::new(1, 1)).unwrap();
        assert!(!can_reach(&grid, a, b, 2));
        assert!(can_reach(&grid, a, b, 3));
        assert!(!can_reach(&grid, a, diag, 4));
        assert!(can_reach(&grid, a, a, 0));
    }

    #[test]
    fn reachability_wraps() {
        let grid = row(&[0.0; 5], true);
        assert!(can_reach(&grid, CellId(0), CellId(4), 1));
        let flat = row(&[0.0; 5], false);
        assert!(!can_reach(&flat, CellId(0), CellId(4), 1));
    }

    #[test]
    fn neighbor_wealth_sums_adjacent_cells() {
        let grid = row(&[1.0, 5.0, 2.0], false);
        assert_eq!(adjacent(&grid, CellId(1)).len(), 2);
        assert_eq!(neighbor_wealth(&grid, CellId(1)), 3.0);
        assert_eq!(neighbor_wealth(&grid, CellId(0)), 5.0);
    }
}

// ── Dynamics ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dynamics {
    use ss_core::{CellId, Tick};

    use crate::dynamics::{advance, diffuse_pollution, pollute, regrow};

    use super::helpers::row;

    #[test]
    fn regrow_is_capped_at_capacity() {
        let mut grid = row(&[4.0, 0.5], false);
        grid.harvest(CellId(0));
        grid.harvest(CellId(1));
        regrow(&mut grid);
        assert_eq!(grid.sugar, vec![1.0, 0.5]);
        regrow(&mut grid);
        assert_eq!(grid.sugar, vec![2.0, 0.5]);
    }

    #[test]
    fn pollution_ignores_negative_amounts() {
        let mut grid = row(&[0.0; 2], false);
        pollute(&mut grid, CellId(0), 2.0);
        pollute(&mut grid, CellId(0), -1.0);
        assert_eq!(grid.pollution[0], 2.0);
    }

    #[test]
    fn diffusion_averages_neighbours() {
        let mut grid = row(&[0.0; 3], false);
        pollute(&mut grid, CellId(0), 3.0);
        diffuse_pollution(&mut grid);
        assert_eq!(grid.pollution, vec![0.0, 1.5, 0.0]);
    }

    #[test]
    fn advance_diffuses_on_period() {
        let mut grid = row(&[0.0; 3], false);
        grid.environment.pollution_diffusion_period = 2;
        pollute(&mut grid, CellId(0), 3.0);
        advance(&mut grid, Tick(1));
        assert_eq!(grid.pollution[0], 3.0);
        advance(&mut grid, Tick(2));
        assert_eq!(grid.pollution[0], 0.0);
    }
}
