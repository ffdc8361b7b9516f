//! Simulation observer trait for progress reporting and data collection.

use ss_agent::AgentStore;
use ss_core::Tick;
use ss_grid::Grid;

use crate::{RuntimeStats, TickSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: extinction watcher
///
/// ```rust,ignore
/// struct Extinction { at: Option<Tick> }
///
/// impl SimObserver for Extinction {
///     fn on_tick_end(&mut self, tick: Tick, _summary: &TickSummary, stats: &RuntimeStats) {
///         if stats.agents == 0 && self.at.is_none() {
///             self.at = Some(tick);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first tick with statistics of the initial
    /// population.
    fn on_sim_start(&mut self, _stats: &RuntimeStats) {}

    /// Called at the very start of each tick, before any agent acts.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every agent has acted and the grid has regrown.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary, _stats: &RuntimeStats) {}

    /// Called every `config.output_interval_ticks` ticks with read-only
    /// access to the full agent and grid state.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore, _grid: &Grid) {}

    /// Called once after the final tick (or on extinction).
    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &RuntimeStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
