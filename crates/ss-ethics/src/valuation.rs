//! Cell valuation under the closed set of decision models.
//!
//! Both models are built from the same felicific terms, evaluated from the
//! point of view of one *perspective* agent:
//!
//! | Term               | Meaning                                              |
//! |--------------------|------------------------------------------------------|
//! | `intensity`        | urgency: inverse of time-to-live, damped by pollution |
//! | `duration`         | how long the cell's wealth would sustain the agent   |
//! | `future_intensity` | wealth of the cell's four neighbours                 |
//! | `future_duration`  | what is left after one step of metabolism            |
//! | `extent`           | the acting agent's view, over the perspective's field |
//! | `future_extent`    | the same, seen from the candidate cell (lookahead)   |
//! | `certainty`        | 1 if the perspective agent can reach the cell, else 0 |
//!
//! Extent always measures what the *acting* agent sees, scaled by the
//! perspective agent's own field of view; see [`Outlook`].
//!
//! Proximity is fixed at 1 since agents plan a single step ahead.

use ss_agent::DecisionModel;
use ss_core::{AgentId, CellId};
use ss_grid::neighborhood::{neighbor_wealth, neighborhood_size};

use crate::Valuation;

/// Weight of the second-step terms.
pub const DISCOUNT: f64 = 0.5;
/// Steps needed to reach any candidate.
pub const PROXIMITY: f64 = 1.0;

// ── Site terms ────────────────────────────────────────────────────────────────

/// Per-cell quantities shared by every perspective.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Site {
    pub wealth:            f64,
    pub max_wealth:        f64,
    pub neighbor_wealth:   f64,
    pub global_max_wealth: f64,
    pub pollution:         f64,
}

impl Site {
    /// Resources on `cell`, plus whatever could be looted from its occupant.
    pub fn of(ctx: &Valuation<'_>, cell: CellId) -> Self {
        let grid = ctx.grid;
        let mut wealth = grid.site_wealth(cell);
        let mut max_wealth = grid.max_site_wealth(cell);
        if let Some(occupant) = grid.occupant(cell) {
            let loot = ctx.agents.wealth(occupant).min(2.0 * grid.environment.max_combat_loot);
            wealth += loot;
            max_wealth += loot;
        }
        Self {
            wealth,
            max_wealth,
            neighbor_wealth: neighbor_wealth(grid, cell),
            global_max_wealth: grid.environment.global_max_wealth(),
            pollution: grid.pollution[cell.index()],
        }
    }
}

/// How many cells the acting agent sees now and would see from the
/// candidate cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Outlook {
    pub now:   usize,
    pub ahead: usize,
}

impl Outlook {
    pub fn of(ctx: &Valuation<'_>, acting: AgentId, cell: CellId) -> Self {
        let i = acting.index();
        let vision = ctx.agents.vision[i];
        Self {
            now:   neighborhood_size(ctx.grid, ctx.agents.cell[i], vision),
            ahead: neighborhood_size(ctx.grid, cell, vision),
        }
    }
}

/// `seen` cells over a full field of `vision` in each of four directions.
fn extent(seen: usize, vision: u32) -> f64 {
    if vision == 0 {
        return 1.0;
    }
    seen as f64 / (vision as f64 * 4.0)
}

// ── Felicific terms ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Felicific {
    pub intensity:        f64,
    pub duration:         f64,
    pub future_intensity: f64,
    pub future_duration:  f64,
    pub extent:           f64,
    pub future_extent:    f64,
    pub certainty:        f64,
}

impl Felicific {
    /// Terms for `cell` as seen by `perspective` when it is also the
    /// acting agent.
    pub fn evaluate(
        ctx:         &Valuation<'_>,
        site:        &Site,
        perspective: AgentId,
        cell:        CellId,
        lookahead:   bool,
    ) -> Self {
        let outlook = Outlook::of(ctx, perspective, cell);
        Self::seen_by(ctx, site, &outlook, perspective, cell, lookahead)
    }

    /// Terms for `cell` as seen by `perspective`, with extent taken from the
    /// acting agent's `outlook`.
    pub fn seen_by(
        ctx:         &Valuation<'_>,
        site:        &Site,
        outlook:     &Outlook,
        perspective: AgentId,
        cell:        CellId,
        lookahead:   bool,
    ) -> Self {
        let agents = ctx.agents;
        let vision = agents.vision[perspective.index()];
        let metabolism = agents.total_metabolism(perspective);

        let duration = if metabolism > 0.0 && site.max_wealth > 0.0 {
            (site.wealth / metabolism) / site.max_wealth
        } else {
            0.0
        };
        let future_duration = if site.max_wealth > 0.0 {
            let left = if metabolism > 0.0 {
                (site.wealth - metabolism) / metabolism
            } else {
                site.wealth
            };
            left / site.max_wealth
        } else {
            0.0
        };
        let future_intensity = if site.global_max_wealth > 0.0 {
            site.neighbor_wealth / (4.0 * site.global_max_wealth)
        } else {
            0.0
        };

        Self {
            intensity: 1.0 / ((1.0 + agents.time_to_live(perspective)) * (1.0 + site.pollution)),
            duration,
            future_intensity,
            future_duration,
            extent: extent(outlook.now, vision),
            future_extent: if lookahead { extent(outlook.ahead, vision) } else { 1.0 },
            certainty: if ctx.reachable(perspective, cell) { 1.0 } else { 0.0 },
        }
    }

    /// Flip the four hedonic terms, turning a gain into an opportunity cost.
    pub fn negated(self) -> Self {
        Self {
            intensity: -self.intensity,
            duration: -self.duration,
            future_intensity: -self.future_intensity,
            future_duration: -self.future_duration,
            ..self
        }
    }

    pub fn combine(&self, lookahead: bool) -> f64 {
        let now = self.intensity + self.duration;
        let later = self.future_intensity + self.future_duration;
        if lookahead {
            self.certainty * PROXIMITY * (self.extent * now + DISCOUNT * self.future_extent * later)
        } else {
            self.extent * self.certainty * PROXIMITY * (now + DISCOUNT * later)
        }
    }
}

// ── Models ────────────────────────────────────────────────────────────────────

/// Value of `cell` to `acting` under its own decision model.
pub fn score(ctx: &Valuation<'_>, acting: AgentId, cell: CellId) -> f64 {
    match ctx.agents.params(acting).decision_model {
        DecisionModel::Egoistic { lookahead } => egoistic(ctx, acting, cell, lookahead),
        DecisionModel::Bentham { lookahead } => bentham(ctx, acting, cell, lookahead),
    }
}

/// The acting agent's own felicific value, less the top-2 margin of every
/// other agent currently set on `cell`.
pub fn egoistic(ctx: &Valuation<'_>, acting: AgentId, cell: CellId, lookahead: bool) -> f64 {
    let site = Site::of(ctx, cell);
    let own = Felicific::evaluate(ctx, &site, acting, cell, lookahead).combine(lookahead);
    let cost: f64 = ctx
        .registry
        .suitors(cell)
        .iter()
        .filter(|&&suitor| suitor != acting)
        .map(|&suitor| ctx.cache(suitor).opportunity_cost())
        .sum();
    own - cost
}

/// Utilitarian sum over the acting agent and every agent it can see.
pub fn bentham(ctx: &Valuation<'_>, acting: AgentId, cell: CellId, lookahead: bool) -> f64 {
    let site = Site::of(ctx, cell);
    let selfishness = ctx.agents.params(acting).selfishness;
    let others_count = selfishness.considers_others();
    let outlook = Outlook::of(ctx, acting, cell);

    let mut neighbors = Vec::with_capacity(ctx.registry.neighborhood(acting).len() + 1);
    neighbors.push(acting);
    neighbors.extend(ctx.visible_agents(acting));

    let mut value = 0.0;
    for neighbor in neighbors {
        let terms = Felicific::seen_by(ctx, &site, &outlook, neighbor, cell, lookahead);
        let factor = ctx.agents.params(neighbor).decision_model_factor;
        let is_self = neighbor == acting;
        let on_cell = ctx.agents.cell[neighbor.index()] == cell;

        let term = if !is_self && !on_cell && others_count {
            factor * terms.negated().combine(lookahead)
        } else if !is_self && on_cell && others_count {
            // Moving here kills the occupant.
            let penalty = -terms.combine(lookahead);
            if penalty > -1.0 { -1.0 } else { penalty }
        } else {
            factor * terms.combine(lookahead)
        };
        value += term * selfishness.weight(is_self);
    }
    value
}
