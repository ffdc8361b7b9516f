//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use ss_agent::{AgentParams, AgentStoreBuilder, Endowment};
//! use ss_core::CellId;
//!
//! let endowment = Endowment { sugar: 5.0, sugar_metabolism: 1.0, vision: 2, ..Default::default() };
//! let (store, rngs) = AgentStoreBuilder::new(42)
//!     .agent(endowment, AgentParams::default(), CellId(0))
//!     .agent(endowment, AgentParams::default(), CellId(1))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.living_count(), 2);
//! assert_eq!(rngs.len(), 2);
//! ```

use ss_core::{AgentId, CellId, Tick};

use crate::{AgentError, AgentParams, AgentResult, AgentRngs, AgentStore, Endowment};

/// Fluent builder for the initial population.
///
/// Every agent is born at `Tick::ZERO`.  Later arrivals go through
/// [`AgentStore::push_agent`] + [`AgentRngs::push`] instead.
pub struct AgentStoreBuilder {
    seed:   u64,
    agents: Vec<(Endowment, AgentParams, CellId)>,
}

impl AgentStoreBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed, agents: Vec::new() }
    }

    pub fn with_capacity(seed: u64, capacity: usize) -> Self {
        Self { seed, agents: Vec::with_capacity(capacity) }
    }

    /// Queue one agent placed on `cell`.
    pub fn agent(mut self, endowment: Endowment, params: AgentParams, cell: CellId) -> Self {
        self.agents.push((endowment, params, cell));
        self
    }

    /// Number of agents queued so far.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Validate endowments and construct `AgentStore` and `AgentRngs`.
    pub fn build(self) -> AgentResult<(AgentStore, AgentRngs)> {
        let mut store = AgentStore::with_capacity(self.agents.len());
        for (i, (endowment, params, cell)) in self.agents.into_iter().enumerate() {
            validate(AgentId(i as u32), &endowment)?;
            store.push_agent(endowment, params, cell, Tick::ZERO);
        }
        let rngs = AgentRngs::new(store.count, self.seed);
        Ok((store, rngs))
    }
}

fn validate(agent: AgentId, e: &Endowment) -> AgentResult<()> {
    let reason = if e.sugar_metabolism < 0.0 || e.spice_metabolism < 0.0 {
        "metabolism must be non-negative"
    } else if !e.sugar.is_finite() || !e.spice.is_finite() {
        "resource stocks must be finite"
    } else {
        return Ok(());
    };
    Err(AgentError::InvalidEndowment { agent, reason: reason.to_string() })
}
