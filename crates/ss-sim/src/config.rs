//! JSON run configuration.
//!
//! Keys are camelCase and every key is optional:
//!
//! ```json
//! {
//!     "initialAgents": 250,
//!     "environmentWidth": 50,
//!     "environmentHeight": 50,
//!     "environmentMaxSugar": 4,
//!     "agentDecisionModels": ["bentham", "egoistic_lookahead"],
//!     "agentSelfishnessFactor": -1,
//!     "logfile": "log.json"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ss_agent::{DecisionModel, Selfishness};
use ss_core::SimConfig;
use ss_grid::Environment;

use crate::{SimError, SimResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SugarscapeConfig {
    // ── Population ────────────────────────────────────────────────────────
    pub initial_agents:              usize,
    pub agent_max_vision:            u32,
    pub agent_max_metabolism:        u32,
    pub agent_max_initial_wealth:    u32,
    /// Movement range; `None` moves as far as the agent sees.
    pub agent_max_movement:          Option<u32>,
    pub agent_max_age:               Option<u64>,
    /// Labels as produced by `DecisionModel::as_str`, dealt out round-robin.
    pub agent_decision_models:       Vec<String>,
    /// `-1` means unweighted.
    pub agent_selfishness_factor:    f64,
    pub agent_decision_model_factor: f64,
    pub agent_aggression_factor:     f64,
    /// Tribes are dealt out round-robin.
    pub agent_tribes:                u16,

    // ── Landscape ─────────────────────────────────────────────────────────
    pub environment_width:                   u32,
    pub environment_height:                  u32,
    pub environment_wraparound:              bool,
    pub environment_max_sugar:               f64,
    /// 0 leaves the landscape sugar-only.
    pub environment_max_spice:               f64,
    pub environment_sugar_regrow_rate:       f64,
    pub environment_spice_regrow_rate:       f64,
    pub environment_max_combat_loot:         f64,
    pub environment_production_pollution:    f64,
    pub environment_consumption_pollution:   f64,
    pub environment_pollution_diffusion_period: u64,

    // ── Run ───────────────────────────────────────────────────────────────
    pub timesteps:       u64,
    pub seed:            u64,
    /// Snapshot every N ticks; 0 disables snapshots.
    pub output_interval: u64,
    pub logfile:         Option<PathBuf>,
}

impl Default for SugarscapeConfig {
    fn default() -> Self {
        Self {
            initial_agents:              250,
            agent_max_vision:            6,
            agent_max_metabolism:        4,
            agent_max_initial_wealth:    5,
            agent_max_movement:          None,
            agent_max_age:               None,
            agent_decision_models:       vec![DecisionModel::default().as_str().to_string()],
            agent_selfishness_factor:    Selfishness::UNWEIGHTED_SENTINEL,
            agent_decision_model_factor: 1.0,
            agent_aggression_factor:     0.0,
            agent_tribes:                1,

            environment_width:                      50,
            environment_height:                     50,
            environment_wraparound:                 true,
            environment_max_sugar:                  4.0,
            environment_max_spice:                  0.0,
            environment_sugar_regrow_rate:          1.0,
            environment_spice_regrow_rate:          1.0,
            environment_max_combat_loot:            0.0,
            environment_production_pollution:       0.0,
            environment_consumption_pollution:      0.0,
            environment_pollution_diffusion_period: 0,

            timesteps:       1_000,
            seed:            0,
            output_interval: 0,
            logfile:         None,
        }
    }
}

impl SugarscapeConfig {
    /// Read and validate a configuration file.
    pub fn from_json_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.environment_width == 0 || self.environment_height == 0 {
            return Err(SimError::Config(format!(
                "environment must be non-empty (got {}x{})",
                self.environment_width, self.environment_height
            )));
        }
        if self.agent_tribes == 0 {
            return Err(SimError::Config("agentTribes must be at least 1".into()));
        }
        let rates = [
            ("environmentMaxSugar", self.environment_max_sugar),
            ("environmentMaxSpice", self.environment_max_spice),
            ("environmentSugarRegrowRate", self.environment_sugar_regrow_rate),
            ("environmentSpiceRegrowRate", self.environment_spice_regrow_rate),
            ("environmentMaxCombatLoot", self.environment_max_combat_loot),
            ("agentAggressionFactor", self.agent_aggression_factor),
        ];
        if let Some((key, value)) = rates.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(SimError::Config(format!("{key} must be a non-negative number (got {value})")));
        }
        self.decision_models().map(|_| ())
    }

    /// The configured decision models, parsed.  An empty list means the
    /// default model.
    pub fn decision_models(&self) -> SimResult<Vec<DecisionModel>> {
        if self.agent_decision_models.is_empty() {
            return Ok(vec![DecisionModel::default()]);
        }
        self.agent_decision_models
            .iter()
            .map(|label| {
                DecisionModel::parse(label)
                    .ok_or_else(|| SimError::Config(format!("unknown decision model {label:?}")))
            })
            .collect()
    }

    pub fn selfishness(&self) -> Selfishness {
        Selfishness::from_factor(self.agent_selfishness_factor)
    }

    #[inline]
    pub fn has_spice(&self) -> bool {
        self.environment_max_spice > 0.0
    }

    pub fn environment(&self) -> Environment {
        Environment {
            max_combat_loot:            self.environment_max_combat_loot,
            sugar_regrow_rate:          self.environment_sugar_regrow_rate,
            spice_regrow_rate:          self.environment_spice_regrow_rate,
            production_pollution:       self.environment_production_pollution,
            consumption_pollution:      self.environment_consumption_pollution,
            pollution_diffusion_period: self.environment_pollution_diffusion_period,
            ..Environment::default()
        }
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            total_ticks:           self.timesteps,
            seed:                  self.seed,
            output_interval_ticks: self.output_interval,
        }
    }
}
