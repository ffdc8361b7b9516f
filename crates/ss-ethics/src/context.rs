//! Read-only world view shared by valuation and filtering.

use ss_agent::AgentStore;
use ss_core::{AgentId, CellId};
use ss_grid::Grid;
use ss_grid::neighborhood::can_reach;

use crate::{BestCellCache, ViewerRegistry};

/// Everything a score depends on, borrowed for the duration of one
/// recompute or refresh.
///
/// Built by [`Engine`](crate::Engine) right before scoring and dropped
/// before any cache is written back, so scoring can read every other
/// agent's cache while the caller holds the only mutable borrow.
pub struct Valuation<'a> {
    pub grid:     &'a Grid,
    pub agents:   &'a AgentStore,
    pub registry: &'a ViewerRegistry,
    /// Indexed by `AgentId`; slots beyond the end read as `Empty`.
    pub caches:   &'a [BestCellCache],
}

impl<'a> Valuation<'a> {
    #[inline]
    pub fn new(
        grid:     &'a Grid,
        agents:   &'a AgentStore,
        registry: &'a ViewerRegistry,
        caches:   &'a [BestCellCache],
    ) -> Self {
        Self { grid, agents, registry, caches }
    }

    #[inline]
    pub fn cache(&self, agent: AgentId) -> BestCellCache {
        self.caches.get(agent.index()).copied().unwrap_or_default()
    }

    /// The agent's own cell followed by its registered neighbourhood.
    pub fn candidates(&self, agent: AgentId) -> Vec<CellId> {
        let hood = self.registry.neighborhood(agent);
        let mut cells = Vec::with_capacity(hood.len() + 1);
        cells.push(self.agents.cell[agent.index()]);
        cells.extend_from_slice(hood);
        cells
    }

    /// Occupants of `agent`'s neighbourhood, excluding `agent` itself, in
    /// neighbourhood order.
    pub fn visible_agents(&self, agent: AgentId) -> Vec<AgentId> {
        self.registry
            .neighborhood(agent)
            .iter()
            .filter_map(|&cell| self.grid.occupant(cell))
            .filter(|&other| other != agent)
            .collect()
    }

    /// `true` if `agent` can step onto `cell` this turn.
    #[inline]
    pub fn reachable(&self, agent: AgentId, cell: CellId) -> bool {
        let i = agent.index();
        can_reach(self.grid, self.agents.cell[i], cell, self.agents.movement[i])
    }
}
