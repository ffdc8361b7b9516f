//! `ss-output` — simulation output writers for the ethical Sugarscape.
//!
//! | Writer          | Files created                                  |
//! |-----------------|------------------------------------------------|
//! | [`CsvWriter`]   | `agent_snapshots.csv`, `tick_summaries.csv`    |
//! | [`JsonLogWriter`] | one JSON array of per-tick [`RuntimeStats`]  |
//!
//! Both implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ss_sim::SimObserver`.  A pair
//! `(A, B)` of writers is itself a writer, as is `Option<W>`, so a run can
//! feed both at once with an optional log.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ss_output::{CsvWriter, JsonLogWriter, SimOutputObserver};
//!
//! let csv = CsvWriter::new(Path::new("./output"))?;
//! let log = JsonLogWriter::create("log.json")?;
//! let mut obs = SimOutputObserver::new((csv, Some(log)));
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```
//!
//! [`RuntimeStats`]: ss_sim::RuntimeStats

pub mod csv;
pub mod error;
pub mod log;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use log::JsonLogWriter;
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
