//! `ss-core` — foundational types for the ethical Sugarscape workspace.
//!
//! Every other `ss-*` crate depends on this one.  It has no `ss-*`
//! dependencies and only `rand` and `thiserror` from the ecosystem (plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                   |
//! |-------------|--------------------------------------------|
//! | [`ids`]     | `AgentId`, `CellId`                        |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`            |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)  |
//! | [`error`]   | `CoreError`, `CoreResult`                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, CellId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
