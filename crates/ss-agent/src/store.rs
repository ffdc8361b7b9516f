//! Core agent storage: `AgentStore` (SoA arena) and `AgentRngs`.
//!
//! # Why two structs?
//!
//! Best-cell selection needs `&AgentStore` (every neighbour's stocks and
//! parameters are read while scoring) and `&mut AgentRng` (the acting
//! agent's tie-break shuffle) at the same time.  Keeping the RNGs in a
//! separate `AgentRngs` lets both borrows coexist.
//!
//! # Slot lifecycle
//!
//! Slots are append-only.  Removing an agent clears its `alive` flag and
//! `cell`, but the slot is never handed to another agent, so an `AgentId`
//! held in a stale collection can always be checked with
//! [`AgentStore::is_alive`].

use ss_core::{AgentId, AgentRng, CellId, CoreError, Tick};

use crate::params::AgentParams;

/// Time-to-live reported for an agent with nothing limiting its lifespan.
pub const UNBOUNDED_TIME_TO_LIVE: f64 = i64::MAX as f64;

/// Resource stocks and physiology an agent is created with.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endowment {
    pub sugar:            f64,
    pub spice:            f64,
    pub sugar_metabolism: f64,
    pub spice_metabolism: f64,
    pub vision:           u32,
    pub movement:         u32,
    /// `None` means the agent never dies of old age.
    pub max_age:          Option<u64>,
}

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
    seed:      u64,
}

impl AgentRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner, seed: global_seed }
    }

    /// Append the RNG for a newly spawned slot.
    pub fn push(&mut self, agent: AgentId) {
        debug_assert_eq!(agent.index(), self.inner.len());
        self.inner.push(AgentRng::new(self.seed, agent));
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` has exactly `count` elements and `AgentId` is the index into
/// all of them.  `count` includes removed agents.
pub struct AgentStore {
    /// Number of slots ever allocated.
    pub count: usize,

    pub alive: Vec<bool>,
    pub birth: Vec<Tick>,
    /// Completed steps of life.
    pub age:   Vec<u64>,

    /// Occupied cell.  `CellId::INVALID` once removed.
    pub cell:  Vec<CellId>,

    // ── Endowment ─────────────────────────────────────────────────────────
    pub sugar:            Vec<f64>,
    pub spice:            Vec<f64>,
    pub sugar_metabolism: Vec<f64>,
    pub spice_metabolism: Vec<f64>,
    pub vision:           Vec<u32>,
    pub movement:         Vec<u32>,
    pub max_age:          Vec<Option<u64>>,

    // ── Behaviour ─────────────────────────────────────────────────────────
    pub params: Vec<AgentParams>,

    living: usize,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            count:            0,
            alive:            Vec::with_capacity(capacity),
            birth:            Vec::with_capacity(capacity),
            age:              Vec::with_capacity(capacity),
            cell:             Vec::with_capacity(capacity),
            sugar:            Vec::with_capacity(capacity),
            spice:            Vec::with_capacity(capacity),
            sugar_metabolism: Vec::with_capacity(capacity),
            spice_metabolism: Vec::with_capacity(capacity),
            vision:           Vec::with_capacity(capacity),
            movement:         Vec::with_capacity(capacity),
            max_age:          Vec::with_capacity(capacity),
            params:           Vec::with_capacity(capacity),
            living:           0,
        }
    }

    /// Allocate a new slot and return its id.
    pub fn push_agent(
        &mut self,
        endowment: Endowment,
        params:    AgentParams,
        cell:      CellId,
        birth:     Tick,
    ) -> AgentId {
        let id = AgentId(self.count as u32);
        self.alive.push(true);
        self.birth.push(birth);
        self.age.push(0);
        self.cell.push(cell);
        self.sugar.push(endowment.sugar);
        self.spice.push(endowment.spice);
        self.sugar_metabolism.push(endowment.sugar_metabolism);
        self.spice_metabolism.push(endowment.spice_metabolism);
        self.vision.push(endowment.vision);
        self.movement.push(endowment.movement);
        self.max_age.push(endowment.max_age);
        self.params.push(params);
        self.count += 1;
        self.living += 1;
        id
    }

    /// Mark `agent` dead.  Returns the cell it occupied.
    pub fn remove(&mut self, agent: AgentId) -> Result<CellId, CoreError> {
        self.check_alive(agent)?;
        let i = agent.index();
        self.alive[i] = false;
        self.living -= 1;
        Ok(std::mem::replace(&mut self.cell[i], CellId::INVALID))
    }

    /// `Ok` if `agent` names a living slot.
    pub fn check_alive(&self, agent: AgentId) -> Result<(), CoreError> {
        match self.alive.get(agent.index()) {
            None => Err(CoreError::AgentNotFound(agent)),
            Some(false) => Err(CoreError::AgentRemoved(agent)),
            Some(true) => Ok(()),
        }
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.alive.get(agent.index()).copied().unwrap_or(false)
    }

    /// Number of living agents.
    #[inline]
    pub fn living_count(&self) -> usize {
        self.living
    }

    pub fn is_empty(&self) -> bool {
        self.living == 0
    }

    /// Living agents in ascending id order.
    pub fn living(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, a)| **a)
            .map(|(i, _)| AgentId(i as u32))
    }

    // ── Derived quantities ────────────────────────────────────────────────

    #[inline]
    pub fn wealth(&self, agent: AgentId) -> f64 {
        self.sugar[agent.index()] + self.spice[agent.index()]
    }

    #[inline]
    pub fn total_metabolism(&self, agent: AgentId) -> f64 {
        self.sugar_metabolism[agent.index()] + self.spice_metabolism[agent.index()]
    }

    #[inline]
    pub fn params(&self, agent: AgentId) -> &AgentParams {
        &self.params[agent.index()]
    }

    /// Steps the agent can survive on its current stocks, further capped
    /// by its remaining lifespan when it has a maximum age.
    pub fn time_to_live(&self, agent: AgentId) -> f64 {
        let i = agent.index();
        let lasts = |stock: f64, metabolism: f64| {
            if metabolism > 0.0 {
                stock.max(0.0) / metabolism
            } else {
                UNBOUNDED_TIME_TO_LIVE
            }
        };
        let ttl = lasts(self.sugar[i], self.sugar_metabolism[i])
            .min(lasts(self.spice[i], self.spice_metabolism[i]));
        match self.max_age[i] {
            Some(max) => ttl.min(max.saturating_sub(self.age[i]) as f64),
            None => ttl,
        }
    }

    /// Cobb–Douglas valuation of the agent's stocks after receiving the
    /// given rewards, with exponents proportional to each metabolism.
    /// Agents without any metabolism value resources at face value.
    pub fn welfare(&self, agent: AgentId, sugar_reward: f64, spice_reward: f64) -> f64 {
        let i = agent.index();
        let sugar = (self.sugar[i] + sugar_reward).max(0.0);
        let spice = (self.spice[i] + spice_reward).max(0.0);
        let total = self.total_metabolism(agent);
        if total <= 0.0 {
            return sugar + spice;
        }
        sugar.powf(self.sugar_metabolism[i] / total) * spice.powf(self.spice_metabolism[i] / total)
    }

    /// `true` once a resource the agent metabolises is used up, or the
    /// agent has outlived its maximum age.
    pub fn is_starved_or_expired(&self, agent: AgentId) -> bool {
        let i = agent.index();
        let starved = (self.sugar_metabolism[i] > 0.0 && self.sugar[i] <= 0.0)
            || (self.spice_metabolism[i] > 0.0 && self.spice[i] <= 0.0);
        let expired = self.max_age[i].is_some_and(|max| self.age[i] > max);
        starved || expired
    }

    /// The endowment a snapshot of `agent` would be recreated from.
    pub fn endowment(&self, agent: AgentId) -> Endowment {
        let i = agent.index();
        Endowment {
            sugar:            self.sugar[i],
            spice:            self.spice[i],
            sugar_metabolism: self.sugar_metabolism[i],
            spice_metabolism: self.spice_metabolism[i],
            vision:           self.vision[i],
            movement:         self.movement[i],
            max_age:          self.max_age[i],
        }
    }
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new()
    }
}
