//! Per-agent top-2 cell cache.

use ss_core::{AgentId, AgentRng, CellId};

use crate::valuation::score;
use crate::{CandidateFilter, CombatRules, EthicsError, EthicsResult, Valuation};

/// A scored candidate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellScore {
    pub cell:  CellId,
    pub value: f64,
}

/// An agent's two best cells.  `best.value >= second.value` whenever both
/// are present.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum BestCellCache {
    #[default]
    Empty,
    Populated { best: CellScore, second: Option<CellScore> },
}

impl BestCellCache {
    /// Top two entries of an already descending-sorted slice.
    pub fn from_ranked(ranked: &[CellScore]) -> Self {
        match ranked {
            [] => BestCellCache::Empty,
            [best, rest @ ..] => BestCellCache::Populated { best: *best, second: rest.first().copied() },
        }
    }

    pub fn best(&self) -> Option<CellScore> {
        match self {
            BestCellCache::Empty => None,
            BestCellCache::Populated { best, .. } => Some(*best),
        }
    }

    pub fn second(&self) -> Option<CellScore> {
        match self {
            BestCellCache::Empty => None,
            BestCellCache::Populated { second, .. } => *second,
        }
    }

    #[inline]
    pub fn best_cell(&self) -> Option<CellId> {
        self.best().map(|s| s.cell)
    }

    /// What this agent would lose if denied its best cell.  Zero without a
    /// fallback.
    pub fn opportunity_cost(&self) -> f64 {
        match self {
            BestCellCache::Populated { best, second: Some(second) } => best.value - second.value,
            _ => 0.0,
        }
    }

    /// Cached cells, best first.
    pub fn cells(&self) -> impl Iterator<Item = CellId> {
        self.best().into_iter().chain(self.second()).map(|s| s.cell)
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.cells().any(|c| c == cell)
    }

    /// Re-rank after `cell` was rescored.  `None` as `score` means the cell
    /// is no longer admissible and leaves the set.
    ///
    /// Returns `None` when a cached entry leaves the set or falls below the
    /// old second-best value.  Either way an uncached cell may now belong in
    /// the top two, so the caller must recompute from scratch.
    pub fn reranked(&self, cell: CellId, score: Option<f64>) -> Option<Self> {
        if self.contains(cell) {
            let floor = self.second().map_or(f64::NEG_INFINITY, |s| s.value);
            match score {
                None => return None,
                Some(value) if value < floor => return None,
                Some(_) => {}
            }
        }
        let mut entries: Vec<CellScore> = self
            .best()
            .into_iter()
            .chain(self.second())
            .filter(|s| s.cell != cell)
            .collect();
        if let Some(value) = score {
            entries.push(CellScore { cell, value });
        }
        entries.sort_by(|a, b| b.value.total_cmp(&a.value));
        Some(Self::from_ranked(&entries))
    }
}

/// Filter, shuffle, score and rank every candidate of `agent`.
///
/// The shuffle happens before the stable sort, so equal scores are broken
/// by the agent's own RNG rather than by grid order.
pub fn recompute_all<R: CombatRules>(
    ctx:   &Valuation<'_>,
    rules: &R,
    agent: AgentId,
    rng:   &mut AgentRng,
) -> EthicsResult<BestCellCache> {
    let filter = CandidateFilter::new(ctx, rules, agent);
    let mut candidates: Vec<CellId> = ctx
        .candidates(agent)
        .into_iter()
        .filter(|&cell| filter.admits(ctx, cell))
        .collect();
    if candidates.is_empty() {
        return Err(EthicsError::NoCandidates(agent));
    }
    rng.shuffle(&mut candidates);

    let mut scored: Vec<CellScore> = candidates
        .into_iter()
        .map(|cell| CellScore { cell, value: score(ctx, agent, cell) })
        .collect();
    scored.sort_by(|a, b| b.value.total_cmp(&a.value));
    Ok(BestCellCache::from_ranked(&scored))
}

/// Rescore a single cell for `agent` and re-rank its cache.  `None` means
/// a full recompute is needed (see [`BestCellCache::reranked`]).
pub fn refresh_one<R: CombatRules>(
    ctx:   &Valuation<'_>,
    rules: &R,
    agent: AgentId,
    cell:  CellId,
) -> Option<BestCellCache> {
    let filter = CandidateFilter::new(ctx, rules, agent);
    let value = filter.admits(ctx, cell).then(|| score(ctx, agent, cell));
    ctx.cache(agent).reranked(cell, value)
}
