//! JSON statistics log.
//!
//! The file is one JSON array with a line per tick and the end-of-run
//! statistics as its last element:
//!
//! ```text
//! [
//! 	{"timestep":0,"agents":250,...},
//! 	{"timestep":1,"agents":248,...},
//! 	{"timestep":2,"agents":247,...}
//! ]
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ss_sim::RuntimeStats;

use crate::OutputResult;
use crate::writer::OutputWriter;

/// Streams [`RuntimeStats`] to any `Write` sink as a JSON array.
pub struct JsonLogWriter<W: Write = BufWriter<File>> {
    out:      W,
    finished: bool,
}

impl JsonLogWriter {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: impl AsRef<Path>) -> OutputResult<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> JsonLogWriter<W> {
    /// Open the array on `out`.
    pub fn new(mut out: W) -> OutputResult<Self> {
        out.write_all(b"[\n")?;
        Ok(Self { out, finished: false })
    }

    /// Unwrap the sink, e.g. to inspect an in-memory log.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, stats: &RuntimeStats, terminator: &[u8]) -> OutputResult<()> {
        self.out.write_all(b"\t")?;
        serde_json::to_writer(&mut self.out, stats)?;
        self.out.write_all(terminator)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonLogWriter<W> {
    fn write_stats(&mut self, stats: &RuntimeStats) -> OutputResult<()> {
        self.line(stats, b",\n")
    }

    fn finish(&mut self, final_stats: &RuntimeStats) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.line(final_stats, b"\n]")?;
        self.out.flush()?;
        Ok(())
    }
}
