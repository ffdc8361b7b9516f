//! Fluent builder for constructing a [`Sim`].

use ss_agent::{AgentRngs, AgentStore};
use ss_core::{SimConfig, SimRng};
use ss_ethics::{CombatRules, Engine, TribalCombat};
use ss_grid::Grid;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, snapshot interval
/// - [`Grid`]: from [`ss_grid::GridBuilder`] or [`crate::setup::build_grid`]
/// - [`AgentStore`] + [`AgentRngs`]: from [`ss_agent::AgentStoreBuilder`];
///   each agent's `cell` is where it starts
/// - `R: CombatRules`: usually [`TribalCombat`]
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                     |
/// |-----------------|-----------------------------|
/// | `.sim_rng(rng)` | `SimRng::new(config.seed)`  |
///
/// # Example
///
/// ```rust,ignore
/// let (agents, rngs) = AgentStoreBuilder::new(seed).agent(e, p, CellId(0)).build()?;
/// let mut sim = SimBuilder::new(config, grid, agents, rngs, TribalCombat).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: CombatRules = TribalCombat> {
    config: SimConfig,
    grid:   Grid,
    agents: AgentStore,
    rngs:   AgentRngs,
    rules:  R,
    rng:    Option<SimRng>,
}

impl<R: CombatRules> SimBuilder<R> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, grid: Grid, agents: AgentStore, rngs: AgentRngs, rules: R) -> Self {
        Self { config, grid, agents, rngs, rules, rng: None }
    }

    /// Continue from an RNG already used for setup, so one seed drives
    /// placement, endowments and activation order.
    pub fn sim_rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Place every living agent on its cell, fill the valuation caches and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<R>> {
        let Self { config, mut grid, agents, mut rngs, rules, rng } = self;

        if rngs.len() != agents.count {
            return Err(SimError::Config(format!(
                "expected {} agent RNGs, got {}",
                agents.count,
                rngs.len()
            )));
        }

        // ── Occupancy ─────────────────────────────────────────────────────
        for agent in agents.living() {
            grid.place(agents.cell[agent.index()], agent)?;
        }

        // ── Valuation index ───────────────────────────────────────────────
        let mut engine = Engine::new(rules, grid.cell_count());
        engine.initialize(&grid, &agents, &mut rngs)?;

        Ok(Sim {
            clock: config.make_clock(),
            rng: rng.unwrap_or_else(|| SimRng::new(config.seed)),
            config,
            grid,
            agents,
            rngs,
            engine,
        })
    }
}
