//! The valuation engine: owns every agent's cache and the viewer registry,
//! and turns a chosen cell into a committed move.

use tracing::{debug, warn};

use ss_agent::{AgentRngs, AgentStore};
use ss_core::{AgentId, CellId};
use ss_grid::Grid;
use ss_grid::neighborhood::visible_cells;

use crate::cache::{recompute_all, refresh_one};
use crate::{
    BestCellCache, CellScore, CombatRules, EthicsError, EthicsResult, TribalCombat, Valuation,
    ViewerRegistry,
};

/// Result of [`Engine::commit_move`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MoveOutcome {
    pub agent:       AgentId,
    pub from:        CellId,
    pub to:          CellId,
    /// Agent killed by moving onto its cell, if any.
    pub victim:      Option<AgentId>,
    pub sugar_loot:  f64,
    pub spice_loot:  f64,
}

impl MoveOutcome {
    #[inline]
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// Best-cell selection with incremental invalidation.
///
/// # Type parameter
///
/// `R` decides combat legality and retaliation; [`TribalCombat`] unless
/// the driver supplies its own.
///
/// The engine never owns the grid or the agents.  Every method borrows them
/// from the driver, which keeps `Grid.occupant` and `AgentStore.cell` in
/// step through the calls on this type.
pub struct Engine<R: CombatRules = TribalCombat> {
    pub rules:    R,
    pub registry: ViewerRegistry,
    /// Indexed by `AgentId`.
    pub caches:   Vec<BestCellCache>,
}

impl<R: CombatRules> Engine<R> {
    pub fn new(rules: R, cell_count: usize) -> Self {
        Self { rules, registry: ViewerRegistry::new(cell_count), caches: Vec::new() }
    }

    #[inline]
    pub fn cache(&self, agent: AgentId) -> BestCellCache {
        self.caches.get(agent.index()).copied().unwrap_or_default()
    }

    fn ensure_slot(&mut self, agent: AgentId) {
        if self.caches.len() <= agent.index() {
            self.caches.resize(agent.index() + 1, BestCellCache::Empty);
        }
    }

    pub(crate) fn valuation<'a>(&'a self, grid: &'a Grid, agents: &'a AgentStore) -> Valuation<'a> {
        Valuation::new(grid, agents, &self.registry, &self.caches)
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Register every living agent as a viewer, then fill every cache in
    /// ascending id order.
    ///
    /// An agent's own cell is always admissible, so every living agent ends
    /// up with a populated cache.
    pub fn initialize(
        &mut self,
        grid:   &Grid,
        agents: &AgentStore,
        rngs:   &mut AgentRngs,
    ) -> EthicsResult<()> {
        let living: Vec<AgentId> = agents.living().collect();
        for &agent in &living {
            self.register(grid, agents, agent);
        }
        for &agent in &living {
            self.recompute(grid, agents, rngs, agent)?;
        }
        debug!(agents = living.len(), "valuation engine initialised");
        Ok(())
    }

    /// Make `agent` a viewer of the neighbourhood around its current cell.
    pub(crate) fn register(&mut self, grid: &Grid, agents: &AgentStore, agent: AgentId) {
        self.ensure_slot(agent);
        let i = agent.index();
        let cells = visible_cells(grid, agents.cell[i], agents.vision[i]);
        self.registry.register(agent, cells);
    }

    // ── Cache maintenance ─────────────────────────────────────────────────

    /// Full recompute of `agent`'s cache.  On `NoCandidates` the cache is
    /// left `Empty` and the error returned.
    pub fn recompute(
        &mut self,
        grid:   &Grid,
        agents: &AgentStore,
        rngs:   &mut AgentRngs,
        agent:  AgentId,
    ) -> EthicsResult<CellScore> {
        agents.check_alive(agent)?;
        self.ensure_slot(agent);
        let result = {
            let ctx = self.valuation(grid, agents);
            recompute_all(&ctx, &self.rules, agent, rngs.get_mut(agent))
        };
        let cache = match &result {
            Ok(cache) => *cache,
            Err(_) => BestCellCache::Empty,
        };
        self.store(agent, cache);
        let cache = result?;
        cache.best().ok_or(EthicsError::NoCandidates(agent))
    }

    /// [`recompute`](Self::recompute) with `NoCandidates` folded into
    /// `Ok(None)`.
    pub(crate) fn rebuild(
        &mut self,
        grid:   &Grid,
        agents: &AgentStore,
        rngs:   &mut AgentRngs,
        agent:  AgentId,
    ) -> EthicsResult<Option<CellScore>> {
        match self.recompute(grid, agents, rngs, agent) {
            Ok(best) => Ok(Some(best)),
            Err(EthicsError::NoCandidates(_)) => {
                debug!(%agent, "no admissible cells");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Rescore one cell in `viewer`'s cache, recomputing whenever the
    /// cached pair can no longer be trusted.
    pub(crate) fn refresh(
        &mut self,
        grid:   &Grid,
        agents: &AgentStore,
        rngs:   &mut AgentRngs,
        viewer: AgentId,
        cell:   CellId,
    ) -> EthicsResult<()> {
        let updated = {
            let ctx = self.valuation(grid, agents);
            refresh_one(&ctx, &self.rules, viewer, cell)
        };
        match updated {
            Some(cache) => self.store(viewer, cache),
            None => {
                self.rebuild(grid, agents, rngs, viewer)?;
            }
        }
        self.verify_cache(grid, agents, rngs, viewer)
    }

    /// Write a cache and move the agent's suitor entry with its best cell.
    fn store(&mut self, agent: AgentId, cache: BestCellCache) {
        self.caches[agent.index()] = cache;
        self.registry.set_suitor(agent, cache.best_cell());
    }

    /// Check `best >= second`, no duplicates, and that both cached cells are
    /// still candidates of `agent`.
    pub fn check_cache(&self, agents: &AgentStore, agent: AgentId) -> EthicsResult<()> {
        let BestCellCache::Populated { best, second } = self.cache(agent) else {
            return Ok(());
        };
        let fail = |detail| Err(EthicsError::InconsistentCache { agent, detail });
        if let Some(second) = second {
            if second.value > best.value {
                return fail("second-best outranks best");
            }
            if second.cell == best.cell {
                return fail("best and second-best are the same cell");
            }
        }
        let own = agents.cell[agent.index()];
        let hood = self.registry.neighborhood(agent);
        if self.cache(agent).cells().any(|c| c != own && !hood.contains(&c)) {
            return fail("cached cell outside the neighbourhood");
        }
        Ok(())
    }

    /// Run [`check_cache`](Self::check_cache).  An inconsistent cache is a
    /// bug: debug builds panic, release builds log and recompute.
    pub fn verify_cache(
        &mut self,
        grid:   &Grid,
        agents: &AgentStore,
        rngs:   &mut AgentRngs,
        agent:  AgentId,
    ) -> EthicsResult<()> {
        if let Err(err) = self.check_cache(agents, agent) {
            if cfg!(debug_assertions) {
                panic!("{err}");
            }
            warn!(%agent, error = %err, "recomputing inconsistent cell cache");
            self.rebuild(grid, agents, rngs, agent)?;
        }
        Ok(())
    }

    // ── Turn ──────────────────────────────────────────────────────────────

    /// Freshly rank `agent`'s candidates and pick where it goes: the best
    /// cell if reachable, else the second best, else stay put.
    pub fn choose_target(
        &mut self,
        grid:   &Grid,
        agents: &AgentStore,
        rngs:   &mut AgentRngs,
        agent:  AgentId,
    ) -> EthicsResult<CellId> {
        let best = self.recompute(grid, agents, rngs, agent)?;
        let ctx = self.valuation(grid, agents);
        let target = [Some(best), self.cache(agent).second()]
            .into_iter()
            .flatten()
            .map(|s| s.cell)
            .find(|&cell| ctx.reachable(agent, cell))
            .unwrap_or(agents.cell[agent.index()]);
        Ok(target)
    }

    /// Move `agent` onto `target`, killing and looting any occupant.
    ///
    /// Only occupancy changes here; viewers are notified by
    /// [`on_agent_moved`](Self::on_agent_moved) once the driver has finished
    /// the rest of the turn on the new cell.
    pub fn commit_move(
        &mut self,
        grid:   &mut Grid,
        agents: &mut AgentStore,
        agent:  AgentId,
        target: CellId,
    ) -> EthicsResult<MoveOutcome> {
        agents.check_alive(agent)?;
        grid.check(target)?;
        let from = agents.cell[agent.index()];
        let mut outcome = MoveOutcome {
            agent,
            from,
            to: target,
            victim: None,
            sugar_loot: 0.0,
            spice_loot: 0.0,
        };
        if target == from {
            return Ok(outcome);
        }

        if let Some(prey) = grid.occupant(target) {
            let cap = grid.environment.max_combat_loot;
            let (p, a) = (prey.index(), agent.index());
            outcome.sugar_loot = cap.min(agents.sugar[p].max(0.0));
            outcome.spice_loot = cap.min(agents.spice[p].max(0.0));
            agents.sugar[a] += outcome.sugar_loot;
            agents.spice[a] += outcome.spice_loot;
            agents.remove(prey)?;
            grid.vacate(target);
            self.forget(prey);
            outcome.victim = Some(prey);
            debug!(attacker = %agent, %prey, cell = %target, sugar = outcome.sugar_loot, spice = outcome.spice_loot, "combat");
        }

        grid.vacate(from);
        grid.place(target, agent)?;
        agents.cell[agent.index()] = target;
        Ok(outcome)
    }

    /// Choose, commit and broadcast in one call.
    pub fn select_and_commit_move(
        &mut self,
        grid:   &mut Grid,
        agents: &mut AgentStore,
        rngs:   &mut AgentRngs,
        agent:  AgentId,
    ) -> EthicsResult<MoveOutcome> {
        let target = self.choose_target(grid, agents, rngs, agent)?;
        self.move_agent(grid, agents, rngs, agent, target)
    }

    /// Commit a move to a given cell and notify its viewers.
    pub fn move_agent(
        &mut self,
        grid:   &mut Grid,
        agents: &mut AgentStore,
        rngs:   &mut AgentRngs,
        agent:  AgentId,
        target: CellId,
    ) -> EthicsResult<MoveOutcome> {
        let outcome = self.commit_move(grid, agents, agent, target)?;
        self.on_agent_moved(grid, agents, rngs, agent, outcome.from)?;
        Ok(outcome)
    }

    /// Drop every registry entry and the cache of a dead agent.
    pub(crate) fn forget(&mut self, agent: AgentId) {
        self.registry.forget(agent);
        if let Some(cache) = self.caches.get_mut(agent.index()) {
            *cache = BestCellCache::Empty;
        }
    }
}
