//! Who may attack whom, and how strongly a victim's tribe can strike back.

use ss_agent::AgentStore;
use ss_core::AgentId;

/// Pluggable combat legality.
///
/// Implementors are queried during candidate filtering, once per occupied
/// cell in the attacker's neighbourhood.
pub trait CombatRules {
    /// `true` if `attacker` is allowed to attack `prey`.
    fn is_valid_prey(&self, agents: &AgentStore, attacker: AgentId, prey: AgentId) -> bool;

    /// Wealth the prey's side could bring against `attacker` after the
    /// attack.  `visible` lists every agent the attacker can see.
    fn retaliation_capability(
        &self,
        agents:   &AgentStore,
        attacker: AgentId,
        prey:     AgentId,
        visible:  &[AgentId],
    ) -> f64;
}

/// Classic Sugarscape combat: only members of other tribes who are no
/// wealthier than the attacker are fair game, and a tribe retaliates with
/// its wealthiest visible member.
#[derive(Copy, Clone, Debug, Default)]
pub struct TribalCombat;

impl CombatRules for TribalCombat {
    fn is_valid_prey(&self, agents: &AgentStore, attacker: AgentId, prey: AgentId) -> bool {
        attacker != prey
            && agents.params(attacker).tribe != agents.params(prey).tribe
            && agents.wealth(prey) <= agents.wealth(attacker)
    }

    fn retaliation_capability(
        &self,
        agents:   &AgentStore,
        attacker: AgentId,
        prey:     AgentId,
        visible:  &[AgentId],
    ) -> f64 {
        let tribe = agents.params(prey).tribe;
        visible
            .iter()
            .filter(|&&a| a != attacker && agents.params(a).tribe == tribe)
            .map(|&a| agents.wealth(a))
            .fold(0.0, f64::max)
    }
}
