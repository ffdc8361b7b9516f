//! Population-level statistics, recomputed once per tick.

use serde::Serialize;

use ss_agent::AgentStore;
use ss_core::Tick;

/// One line of the run log.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeStats {
    pub timestep:         u64,
    pub agents:           usize,
    pub mean_metabolism:  f64,
    pub mean_vision:      f64,
    pub mean_wealth:      f64,
    pub mean_age:         f64,
    pub gini_coefficient: f64,
    pub total_wealth:     f64,
    pub max_wealth:       f64,
    pub min_wealth:       f64,
}

impl RuntimeStats {
    /// Summarise the living population.  All fields are 0 once it is gone.
    pub fn collect(tick: Tick, agents: &AgentStore) -> Self {
        let living: Vec<usize> = agents.living().map(|a| a.index()).collect();
        let mut stats = RuntimeStats { timestep: tick.0, agents: living.len(), ..Default::default() };
        if living.is_empty() {
            return stats;
        }
        let n = living.len() as f64;
        let wealth: Vec<f64> = living.iter().map(|&i| agents.sugar[i] + agents.spice[i]).collect();

        stats.mean_metabolism = living
            .iter()
            .map(|&i| agents.sugar_metabolism[i] + agents.spice_metabolism[i])
            .sum::<f64>()
            / n;
        stats.mean_vision = living.iter().map(|&i| agents.vision[i] as f64).sum::<f64>() / n;
        stats.mean_age = living.iter().map(|&i| agents.age[i] as f64).sum::<f64>() / n;
        stats.total_wealth = wealth.iter().sum();
        stats.mean_wealth = stats.total_wealth / n;
        stats.max_wealth = wealth.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        stats.min_wealth = wealth.iter().copied().fold(f64::INFINITY, f64::min);
        stats.gini_coefficient = gini(&wealth);
        stats
    }
}

/// Gini coefficient of `values`: 0 for perfect equality, approaching 1 as
/// one holder takes everything.  0 for empty or non-positive totals.
pub fn gini(values: &[f64]) -> f64 {
    let total: f64 = values.iter().sum();
    if values.is_empty() || total <= 0.0 {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    let weighted: f64 = sorted.iter().enumerate().map(|(i, x)| (i as f64 + 1.0) * x).sum();
    (2.0 * weighted) / (n * total) - (n + 1.0) / n
}
