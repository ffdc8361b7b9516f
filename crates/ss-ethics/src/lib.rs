//! `ss-ethics` — how agents value cells, and how those valuations are kept
//! fresh as the landscape changes around them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                         |
//! |---------------|------------------------------------------------------------------|
//! | [`context`]   | `Valuation<'a>`: read-only view of grid, agents and caches       |
//! | [`valuation`] | felicific terms, Egoistic and Bentham scoring, [`score`]         |
//! | [`combat`]    | `CombatRules` trait, `TribalCombat` default                      |
//! | [`filter`]    | `CandidateFilter`: occupancy, prey legality, retaliation risk    |
//! | [`cache`]     | `BestCellCache`, `CellScore`, `recompute_all`, `refresh_one`     |
//! | [`registry`]  | `ViewerRegistry`: per-cell viewers and suitors                   |
//! | [`engine`]    | `Engine`: selection, moves and combat, cache audit               |
//! | [`broker`]    | move / removal / spawn invalidation on `Engine`                  |
//! | [`error`]     | `EthicsError`, `EthicsResult<T>`                                 |
//!
//! # Invalidation in brief
//!
//! Every agent caches its two best candidate cells.  When an agent moves
//! from A to B only the viewers of A and B rescore, and only the one cell
//! that changed.  Everything else in their caches is left as it was until
//! they next act, at which point a full recompute happens anyway.

pub mod broker;
pub mod cache;
pub mod combat;
pub mod context;
pub mod engine;
pub mod error;
pub mod filter;
pub mod registry;
pub mod valuation;


pub use cache::{BestCellCache, CellScore};
pub use combat::{CombatRules, TribalCombat};
pub use context::Valuation;
pub use engine::{Engine, MoveOutcome};
pub use error::{EthicsError, EthicsResult};
pub use filter::CandidateFilter;
pub use registry::ViewerRegistry;
pub use valuation::score;
