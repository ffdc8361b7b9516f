//! Viewer and suitor back-references.
//!
//! Two invariants hold between moves:
//!
//! ```text
//! a ∈ viewers(c)  ⟺  c ∈ neighborhood(a)
//! a ∈ suitors(c)  ⟺  best(a) == c
//! ```
//!
//! Per-cell sets are `BTreeSet`s so that the order in which the broker
//! notifies agents is ascending `AgentId`, independent of insertion
//! history.

use std::collections::BTreeSet;

use ss_core::{AgentId, CellId};

/// Per-cell viewer and suitor sets plus each agent's neighbourhood.
pub struct ViewerRegistry {
    viewers:      Vec<BTreeSet<AgentId>>,
    suitors:      Vec<BTreeSet<AgentId>>,
    /// Cells each agent is currently registered as viewing.
    neighborhood: Vec<Vec<CellId>>,
    /// Cell each agent is registered as suitor of.
    suited:       Vec<Option<CellId>>,
}

impl ViewerRegistry {
    pub fn new(cell_count: usize) -> Self {
        Self {
            viewers:      vec![BTreeSet::new(); cell_count],
            suitors:      vec![BTreeSet::new(); cell_count],
            neighborhood: Vec::new(),
            suited:       Vec::new(),
        }
    }

    fn ensure(&mut self, agent: AgentId) {
        let need = agent.index() + 1;
        if self.neighborhood.len() < need {
            self.neighborhood.resize_with(need, Vec::new);
            self.suited.resize(need, None);
        }
    }

    // ── Viewers ───────────────────────────────────────────────────────────

    /// Make `agent` a viewer of exactly `cells`, replacing any previous
    /// registration.
    pub fn register(&mut self, agent: AgentId, cells: Vec<CellId>) {
        self.deregister(agent);
        for &cell in &cells {
            self.viewers[cell.index()].insert(agent);
        }
        self.neighborhood[agent.index()] = cells;
    }

    /// Remove `agent` from every viewer set.  Returns the neighbourhood it
    /// was registered on.
    pub fn deregister(&mut self, agent: AgentId) -> Vec<CellId> {
        self.ensure(agent);
        let cells = std::mem::take(&mut self.neighborhood[agent.index()]);
        for &cell in &cells {
            self.viewers[cell.index()].remove(&agent);
        }
        cells
    }

    #[inline]
    pub fn viewers(&self, cell: CellId) -> &BTreeSet<AgentId> {
        &self.viewers[cell.index()]
    }

    /// Snapshot of a cell's viewers, for iterating while caches change.
    pub fn viewers_of(&self, cell: CellId) -> Vec<AgentId> {
        self.viewers[cell.index()].iter().copied().collect()
    }

    /// Registered neighbourhood of `agent`; empty if never registered.
    pub fn neighborhood(&self, agent: AgentId) -> &[CellId] {
        self.neighborhood.get(agent.index()).map_or(&[][..], Vec::as_slice)
    }

    // ── Suitors ───────────────────────────────────────────────────────────

    #[inline]
    pub fn suitors(&self, cell: CellId) -> &BTreeSet<AgentId> {
        &self.suitors[cell.index()]
    }

    pub fn suited(&self, agent: AgentId) -> Option<CellId> {
        self.suited.get(agent.index()).copied().flatten()
    }

    /// Point `agent`'s suitor entry at `cell`.  Returns `true` if it moved.
    pub fn set_suitor(&mut self, agent: AgentId, cell: Option<CellId>) -> bool {
        self.ensure(agent);
        let slot = &mut self.suited[agent.index()];
        if *slot == cell {
            return false;
        }
        if let Some(old) = slot.take() {
            self.suitors[old.index()].remove(&agent);
        }
        if let Some(new) = cell {
            self.suitors[new.index()].insert(agent);
        }
        *slot = cell;
        true
    }

    /// Drop every back-reference held for `agent`.
    pub fn forget(&mut self, agent: AgentId) {
        self.deregister(agent);
        self.set_suitor(agent, None);
    }
}
