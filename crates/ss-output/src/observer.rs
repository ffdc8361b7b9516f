//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use ss_agent::AgentStore;
use ss_core::Tick;
use ss_grid::Grid;
use ss_sim::{RuntimeStats, SimObserver, TickSummary};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries, statistics and agent
/// snapshots to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary, stats: &RuntimeStats) {
        let row = TickSummaryRow {
            tick:             tick.0,
            agents:           stats.agents as u64,
            acted:            summary.acted as u64,
            moved:            summary.moved as u64,
            kills:            summary.kills as u64,
            deaths:           summary.deaths as u64,
            mean_wealth:      stats.mean_wealth,
            gini_coefficient: stats.gini_coefficient,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
        let result = self.writer.write_stats(stats);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, grid: &Grid) {
        let rows: Vec<AgentSnapshotRow> = agents
            .living()
            .map(|agent| {
                let i = agent.index();
                let pos = grid.pos(agents.cell[i]);
                AgentSnapshotRow {
                    agent_id:       agent.0,
                    tick:           tick.0,
                    x:              pos.x,
                    y:              pos.y,
                    sugar:          agents.sugar[i],
                    spice:          agents.spice[i],
                    vision:         agents.vision[i],
                    age:            agents.age[i],
                    tribe:          agents.params[i].tribe.0,
                    decision_model: agents.params[i].decision_model.as_str(),
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, stats: &RuntimeStats) {
        let result = self.writer.finish(stats);
        self.store_err(result);
    }
}
