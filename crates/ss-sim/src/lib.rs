//! `ss-sim` — the Sugarscape tick loop.
//!
//! # Tick
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   shuffle the living agents with the simulation RNG
//!   for each agent still alive:
//!     ① Select     — fresh ranking; best reachable of the top two, else stay
//!     ② Move       — occupy the target, killing and looting any occupant
//!     ③ Gather     — harvest the cell; production pollution
//!     ④ Metabolise — burn sugar and spice; consumption pollution
//!     ⑤ Age
//!     ⑥ Broker     — viewers of the vacated and entered cells rescore them
//!     ⑦ Death      — starved or too old agents leave every index
//!   regrow the grid; diffuse pollution on its period
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ss_sim::{NoopObserver, SugarscapeConfig, setup};
//!
//! let config = SugarscapeConfig::from_json_path("config.json")?;
//! let mut sim = setup::build_sim(&config)?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod setup;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::SugarscapeConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, TickSummary};
pub use stats::{RuntimeStats, gini};
