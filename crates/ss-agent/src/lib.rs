//! `ss-agent` — Structure-of-Arrays agent storage for the ethical Sugarscape.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`params`]  | `DecisionModel`, `Selfishness`, `Tribe`, `Sex`, `AgentParams`  |
//! | [`store`]   | `Endowment`, `AgentStore` (SoA arena), `AgentRngs`             |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction of the initial population) |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                                 |
//!
//! Agents never hold references to cells or to each other.  The `cell`
//! array stores a `CellId` resolved through `ss_grid::Grid`, and viewer /
//! suitor back-references live in `ss_ethics::ViewerRegistry`.

pub mod builder;
pub mod error;
pub mod params;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use params::{AgentParams, DecisionModel, Selfishness, Sex, Tribe};
pub use store::{AgentRngs, AgentStore, Endowment, UNBOUNDED_TIME_TO_LIVE};
