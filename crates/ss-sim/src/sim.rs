//! The `Sim` struct and its tick loop.

use tracing::{debug, info};

use ss_agent::{AgentRngs, AgentStore, Endowment};
use ss_core::{AgentId, CellId, SimClock, SimConfig, SimRng, Tick};
use ss_ethics::{CombatRules, Engine, MoveOutcome, TribalCombat};
use ss_grid::{Grid, GridError, dynamics};

use crate::{RuntimeStats, SimObserver, SimResult};

/// What happened during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Agents that took a turn.
    pub acted:  usize,
    /// Agents that ended their turn on a different cell.
    pub moved:  usize,
    /// Agents killed in combat.
    pub kills:  usize,
    /// Agents that starved or died of old age.
    pub deaths: usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Every tick each living agent, in a freshly shuffled order, takes one
/// turn:
///
/// 1. **Select**: rank its candidate cells and pick a reachable target.
/// 2. **Move**: occupy the target, killing and looting any occupant.
/// 3. **Gather**: harvest the cell, leaving production pollution behind.
/// 4. **Metabolise**: burn sugar and spice, leaving consumption pollution.
/// 5. **Age**.
/// 6. **Notify**: viewers of the vacated and entered cells rescore them.
/// 7. **Death**: a starved or expired agent leaves the world.
///
/// After the last turn the landscape regrows.
///
/// Create via [`SimBuilder`][crate::SimBuilder] or
/// [`setup::build_sim`][crate::setup::build_sim].
pub struct Sim<R: CombatRules = TribalCombat> {
    /// Total ticks, seed, snapshot interval.
    pub config: SimConfig,

    pub clock: SimClock,

    pub grid: Grid,

    pub agents: AgentStore,

    /// Per-agent RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Valuation caches and the viewer/suitor index.
    pub engine: Engine<R>,

    /// Activation order.
    pub rng: SimRng,
}

impl<R: CombatRules> Sim<R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`, or until the
    /// population dies out.  Returns the tick the run stopped at.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Tick> {
        observer.on_sim_start(&self.stats());
        while self.clock.current_tick < self.config.end_tick() {
            if self.agents.is_empty() {
                info!(tick = %self.clock, "population extinct");
                break;
            }
            self.step(observer)?;
        }
        let end = self.clock.current_tick;
        let stats = self.stats();
        info!(tick = %end, agents = stats.agents, gini = stats.gini_coefficient, "simulation finished");
        observer.on_sim_end(end, &stats);
        Ok(end)
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`
    /// and extinction).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick, report it to `observer` and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickSummary> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now)?;
        let stats = RuntimeStats::collect(now, &self.agents);
        debug!(tick = now.0, ?summary, agents = stats.agents, "tick complete");
        observer.on_tick_end(now, &summary, &stats);
        if self.config.snapshot_due(now) {
            observer.on_snapshot(now, &self.agents, &self.grid);
        }
        self.clock.advance();
        Ok(summary)
    }

    /// Statistics of the living population at the current tick.
    pub fn stats(&self) -> RuntimeStats {
        RuntimeStats::collect(self.clock.current_tick, &self.agents)
    }

    /// Add a child of `parent` on the empty `cell`.  The child inherits the
    /// parent's behavioural parameters and joins the valuation index at
    /// once.
    pub fn spawn_child(
        &mut self,
        parent:    AgentId,
        endowment: Endowment,
        cell:      CellId,
    ) -> SimResult<AgentId> {
        self.agents.check_alive(parent)?;
        self.grid.check(cell)?;
        if let Some(occupant) = self.grid.occupant(cell) {
            return Err(GridError::Occupied { cell, occupant }.into());
        }
        let params = *self.agents.params(parent);
        let child = self.agents.push_agent(endowment, params, cell, self.clock.current_tick);
        self.rngs.push(child);
        self.engine.on_agent_spawned(&mut self.grid, &self.agents, &mut self.rngs, child)?;
        debug!(%parent, %child, %cell, "agent spawned");
        Ok(child)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        let mut order: Vec<AgentId> = self.agents.living().collect();
        self.rng.shuffle(&mut order);

        let mut summary = TickSummary::default();
        for agent in order {
            // Killed earlier this tick.
            if !self.agents.is_alive(agent) {
                continue;
            }
            let (outcome, died) = self.take_turn(agent)?;
            summary.acted += 1;
            summary.moved += outcome.moved() as usize;
            summary.kills += outcome.victim.is_some() as usize;
            summary.deaths += died as usize;
        }

        dynamics::advance(&mut self.grid, now);
        Ok(summary)
    }

    /// One agent's turn.  Returns the move and whether the agent died at
    /// the end of it.
    fn take_turn(&mut self, agent: AgentId) -> SimResult<(MoveOutcome, bool)> {
        let i = agent.index();

        // ── Select ────────────────────────────────────────────────────────
        let target = self.engine.choose_target(&self.grid, &self.agents, &mut self.rngs, agent)?;

        // ── Move ──────────────────────────────────────────────────────────
        let outcome = self.engine.commit_move(&mut self.grid, &mut self.agents, agent, target)?;

        // ── Gather ────────────────────────────────────────────────────────
        let (sugar, spice) = self.grid.harvest(outcome.to);
        self.agents.sugar[i] += sugar;
        self.agents.spice[i] += spice;
        let produced = self.grid.environment.production_pollution * (sugar + spice);
        dynamics::pollute(&mut self.grid, outcome.to, produced);

        // ── Metabolise ────────────────────────────────────────────────────
        let (sm, pm) = (self.agents.sugar_metabolism[i], self.agents.spice_metabolism[i]);
        self.agents.sugar[i] -= sm;
        self.agents.spice[i] -= pm;
        let consumed = self.grid.environment.consumption_pollution * (sm + pm);
        dynamics::pollute(&mut self.grid, outcome.to, consumed);

        self.agents.age[i] += 1;

        // ── Notify ────────────────────────────────────────────────────────
        self.engine.on_agent_moved(&self.grid, &self.agents, &mut self.rngs, agent, outcome.from)?;

        // ── Death ─────────────────────────────────────────────────────────
        let died = self.agents.is_starved_or_expired(agent);
        if died {
            let cell = self.engine.on_agent_removed(&mut self.grid, &mut self.agents, &mut self.rngs, agent)?;
            debug!(%agent, %cell, age = self.agents.age[i], "agent died");
        }
        Ok((outcome, died))
    }
}
