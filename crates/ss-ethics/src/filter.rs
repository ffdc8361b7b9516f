//! Candidate pruning ahead of scoring.

use ss_core::{AgentId, CellId};

use crate::{CombatRules, Valuation};

/// Per-turn filter for one acting agent.
///
/// A cell is rejected by the first check it fails:
///
/// 1. occupied by another agent while the acting agent never attacks;
/// 2. the occupant is not legal prey;
/// 3. the occupant's tribe could retaliate with more than the acting
///    agent's wealth plus what the cell is worth to it.
pub struct CandidateFilter<'r, R: CombatRules> {
    rules:      &'r R,
    attacker:   AgentId,
    aggression: f64,
    loot_cap:   f64,
    visible:    Vec<AgentId>,
}

impl<'r, R: CombatRules> CandidateFilter<'r, R> {
    pub fn new(ctx: &Valuation<'_>, rules: &'r R, attacker: AgentId) -> Self {
        Self {
            rules,
            attacker,
            aggression: ctx.agents.params(attacker).aggression,
            loot_cap: ctx.grid.environment.max_combat_loot,
            visible: ctx.visible_agents(attacker),
        }
    }

    pub fn admits(&self, ctx: &Valuation<'_>, cell: CellId) -> bool {
        let Some(prey) = ctx.grid.occupant(cell).filter(|&a| a != self.attacker) else {
            return true;
        };
        if self.aggression == 0.0 {
            return false;
        }
        let agents = ctx.agents;
        if !self.rules.is_valid_prey(agents, self.attacker, prey) {
            return false;
        }
        let sugar_loot = self.aggression * self.loot_cap.min(agents.sugar[prey.index()]);
        let spice_loot = self.aggression * self.loot_cap.min(agents.spice[prey.index()]);
        let welfare = agents.welfare(
            self.attacker,
            ctx.grid.sugar[cell.index()] + sugar_loot,
            ctx.grid.spice[cell.index()] + spice_loot,
        );
        let cell_wealth = welfare / (1.0 + ctx.grid.pollution[cell.index()]);
        let retaliation =
            self.rules.retaliation_capability(agents, self.attacker, prey, &self.visible);
        retaliation <= agents.wealth(self.attacker) + cell_wealth
    }
}
