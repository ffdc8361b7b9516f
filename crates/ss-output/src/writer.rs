//! The `OutputWriter` trait implemented by all backend writers.

use ss_sim::RuntimeStats;

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and JSON-log writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
/// Backends ignore the records they have no file for.
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        Ok(())
    }

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
        Ok(())
    }

    /// Write the population statistics of one tick.
    fn write_stats(&mut self, _stats: &RuntimeStats) -> OutputResult<()> {
        Ok(())
    }

    /// Write the end-of-run statistics, then flush and close all underlying
    /// file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self, final_stats: &RuntimeStats) -> OutputResult<()>;
}

impl<W: OutputWriter> OutputWriter for Option<W> {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.write_snapshots(rows))
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.write_tick_summary(row))
    }

    fn write_stats(&mut self, stats: &RuntimeStats) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.write_stats(stats))
    }

    fn finish(&mut self, final_stats: &RuntimeStats) -> OutputResult<()> {
        self.as_mut().map_or(Ok(()), |w| w.finish(final_stats))
    }
}

/// Both writers receive every record; the first error wins.
impl<A: OutputWriter, B: OutputWriter> OutputWriter for (A, B) {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        let first = self.0.write_snapshots(rows);
        let second = self.1.write_snapshots(rows);
        first.and(second)
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let first = self.0.write_tick_summary(row);
        let second = self.1.write_tick_summary(row);
        first.and(second)
    }

    fn write_stats(&mut self, stats: &RuntimeStats) -> OutputResult<()> {
        let first = self.0.write_stats(stats);
        let second = self.1.write_stats(stats);
        first.and(second)
    }

    fn finish(&mut self, final_stats: &RuntimeStats) -> OutputResult<()> {
        let first = self.0.finish(final_stats);
        let second = self.1.finish(final_stats);
        first.and(second)
    }
}
