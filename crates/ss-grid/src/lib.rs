//! `ss-grid` — the resource landscape agents compete over.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`grid`]         | `Grid` (SoA cells), `GridPos`, `GridBuilder` with resource peaks |
//! | [`environment`]  | `Environment`: global maxima, loot cap, growth and pollution rates |
//! | [`neighborhood`] | cardinal-direction vision and reachability queries        |
//! | [`dynamics`]     | regrowth, pollution accumulation and diffusion             |
//! | [`error`]        | `GridError`, `GridResult<T>`                               |
//!
//! # Occupancy
//!
//! A cell records at most one occupant as a plain `AgentId`.  The grid never
//! owns agents; `ss-agent`'s arena does, and the two are kept in step by
//! the simulation driver.

pub mod dynamics;
pub mod environment;
pub mod error;
pub mod grid;
pub mod neighborhood;

#[cfg(test)]
mod tests;

pub use environment::Environment;
pub use error::{GridError, GridResult};
pub use grid::{Grid, GridBuilder, GridPos};
