//! World construction from a [`SugarscapeConfig`]: the landscape, the
//! initial population and its placement.

use tracing::{info, warn};

use ss_agent::{AgentParams, AgentStoreBuilder, Endowment, Tribe};
use ss_core::SimRng;
use ss_ethics::TribalCombat;
use ss_grid::{Grid, GridBuilder, GridPos};

use crate::{Sim, SimBuilder, SimResult, SugarscapeConfig};

/// Two sugar peaks on one diagonal and, when spice is enabled, two spice
/// peaks on the other.
pub fn build_grid(config: &SugarscapeConfig) -> SimResult<Grid> {
    let (w, h) = (config.environment_width, config.environment_height);
    let at = |fx: f64, fy: f64| GridPos::new((w as f64 * fx).ceil() as u32, (h as f64 * fy).ceil() as u32);
    let radius = (2.0 * (w as f64 + h as f64)).sqrt().ceil();

    let mut builder = GridBuilder::new(w, h)
        .wraparound(config.environment_wraparound)
        .environment(config.environment())
        .sugar_peak(at(0.3, 0.7), radius, config.environment_max_sugar)
        .sugar_peak(at(0.7, 0.3), radius, config.environment_max_sugar);
    if config.has_spice() {
        builder = builder
            .spice_peak(at(0.3, 0.3), radius, config.environment_max_spice)
            .spice_peak(at(0.7, 0.7), radius, config.environment_max_spice);
    }
    Ok(builder.build()?)
}

/// `n` values cycling through `min(1, max)..=max`.
pub fn round_robin(n: usize, max: u32) -> Vec<u32> {
    let lo = max.min(1);
    (lo..=max).cycle().take(n).collect()
}

/// Round-robin endowment sequences, each shuffled independently so that
/// vision, metabolism and wealth are uncorrelated.
pub fn endowments(config: &SugarscapeConfig, n: usize, rng: &mut SimRng) -> Vec<Endowment> {
    let mut shuffled = |max: u32| {
        let mut seq = round_robin(n, max);
        rng.shuffle(&mut seq);
        seq
    };
    let spice_max = |max: u32| if config.has_spice() { max } else { 0 };

    let vision = shuffled(config.agent_max_vision);
    let sugar_metabolism = shuffled(config.agent_max_metabolism);
    let spice_metabolism = shuffled(spice_max(config.agent_max_metabolism));
    let sugar = shuffled(config.agent_max_initial_wealth);
    let spice = shuffled(spice_max(config.agent_max_initial_wealth));
    let movement = config.agent_max_movement.map(&mut shuffled);

    (0..n)
        .map(|i| Endowment {
            sugar:            sugar[i] as f64,
            spice:            spice[i] as f64,
            sugar_metabolism: sugar_metabolism[i] as f64,
            spice_metabolism: spice_metabolism[i] as f64,
            vision:           vision[i],
            movement:         movement.as_ref().map_or(vision[i], |m| m[i]),
            max_age:          config.agent_max_age,
        })
        .collect()
}

/// Behavioural parameters for agent `i`: decision models and tribes are
/// dealt out round-robin, the scalar factors are shared.
pub fn params(config: &SugarscapeConfig, i: usize) -> SimResult<AgentParams> {
    let models = config.decision_models()?;
    Ok(AgentParams {
        decision_model:        models[i % models.len()],
        selfishness:           config.selfishness(),
        decision_model_factor: config.agent_decision_model_factor,
        aggression:            config.agent_aggression_factor,
        tribe:                 Tribe((i % config.agent_tribes.max(1) as usize) as u16),
        sex:                   None,
    })
}

/// Validate `config`, build the landscape and population, and return a
/// ready-to-run simulation with the default combat rules.
pub fn build_sim(config: &SugarscapeConfig) -> SimResult<Sim<TribalCombat>> {
    config.validate()?;
    let mut rng = SimRng::new(config.seed);
    let grid = build_grid(config)?;

    let mut cells = grid.empty_cells();
    let mut n = config.initial_agents;
    if n > cells.len() {
        warn!(requested = n, cells = cells.len(), "more agents than cells; population capped");
        n = cells.len();
    }
    rng.shuffle(&mut cells);

    let mut builder = AgentStoreBuilder::with_capacity(config.seed, n);
    for (i, (endowment, &cell)) in endowments(config, n, &mut rng).into_iter().zip(&cells).enumerate() {
        builder = builder.agent(endowment, params(config, i)?, cell);
    }
    let (agents, rngs) = builder.build()?;

    info!(
        agents = agents.living_count(),
        width = grid.width,
        height = grid.height,
        sugar = grid.total_resources(),
        "world built"
    );
    SimBuilder::new(config.sim_config(), grid, agents, rngs, TribalCombat)
        .sim_rng(rng)
        .build()
}
