//! Invalidation after moves, deaths and births.
//!
//! A move from A to B touches exactly:
//!
//! 1. the mover's own viewer registrations, which are dropped;
//! 2. every remaining viewer of A, which rescores A;
//! 3. every viewer of B other than the mover, which rescores B (skipped
//!    when the mover stayed on A);
//! 4. the mover, which registers on its new neighbourhood and recomputes.
//!
//! A death is a move with no destination.  A birth is a move with no
//! origin.

use tracing::trace;

use ss_agent::{AgentRngs, AgentStore};
use ss_core::{AgentId, CellId};
use ss_grid::Grid;

use crate::{CombatRules, Engine, EthicsResult};

impl<R: CombatRules> Engine<R> {
    /// Notify viewers after `agent` went from `from` to its current cell.
    pub fn on_agent_moved(
        &mut self,
        grid:   &Grid,
        agents: &AgentStore,
        rngs:   &mut AgentRngs,
        agent:  AgentId,
        from:   CellId,
    ) -> EthicsResult<()> {
        agents.check_alive(agent)?;
        let to = agents.cell[agent.index()];

        self.registry.deregister(agent);

        let vacated = self.registry.viewers_of(from);
        trace!(%agent, cell = %from, viewers = vacated.len(), "refreshing vacated cell");
        for viewer in vacated {
            self.refresh(grid, agents, rngs, viewer, from)?;
        }

        if to != from {
            let entered = self.registry.viewers_of(to);
            trace!(%agent, cell = %to, viewers = entered.len(), "refreshing entered cell");
            for viewer in entered.into_iter().filter(|&v| v != agent) {
                self.refresh(grid, agents, rngs, viewer, to)?;
            }
        }

        self.register(grid, agents, agent);
        self.rebuild(grid, agents, rngs, agent)?;
        Ok(())
    }

    /// Remove a dead agent from the store, the grid and every index, then
    /// rescore its cell for those who could see it.  Returns that cell.
    pub fn on_agent_removed(
        &mut self,
        grid:   &mut Grid,
        agents: &mut AgentStore,
        rngs:   &mut AgentRngs,
        agent:  AgentId,
    ) -> EthicsResult<CellId> {
        let cell = agents.remove(agent)?;
        if grid.occupant(cell) == Some(agent) {
            grid.vacate(cell);
        }
        self.forget(agent);
        for viewer in self.registry.viewers_of(cell) {
            self.refresh(grid, agents, rngs, viewer, cell)?;
        }
        Ok(cell)
    }

    /// Bring a freshly pushed agent into the index: occupy its cell, let
    /// that cell's viewers rescore it, then register and fill the child's
    /// own cache.
    pub fn on_agent_spawned(
        &mut self,
        grid:   &mut Grid,
        agents: &AgentStore,
        rngs:   &mut AgentRngs,
        child:  AgentId,
    ) -> EthicsResult<()> {
        agents.check_alive(child)?;
        let cell = agents.cell[child.index()];
        grid.place(cell, child)?;
        for viewer in self.registry.viewers_of(cell) {
            self.refresh(grid, agents, rngs, viewer, cell)?;
        }
        self.register(grid, agents, child);
        self.rebuild(grid, agents, rngs, child)?;
        Ok(())
    }
}
