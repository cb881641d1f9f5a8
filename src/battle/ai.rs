//! Decision rules for the automated opponent.

use crate::battle::state::{BattleState, Side, TurnRng};
use crate::config;

/// What the opponent decided to do with its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentAction {
    UseSkill {
        skill_index: usize,
        taunt: &'static str,
    },
    /// No affordable skill — regain mana and hand the turn back.
    Skip,
}

/// A trait for any system that can decide on the opponent's battle action.
/// This provides a common interface for different opponent strategies.
pub trait Behavior {
    /// Inspects the battle state and decides the opponent's next action.
    fn decide_action(&self, state: &BattleState, rng: &mut TurnRng) -> OpponentAction;
}

/// The default policy: pick an affordable skill uniformly at random, with an
/// independently chosen taunt; skip when nothing is affordable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomPolicy {
    fn decide_action(&self, state: &BattleState, rng: &mut TurnRng) -> OpponentAction {
        let opponent = &state.combatants[Side::Opponent.index()];
        let mana = state.mana[Side::Opponent.index()];

        let affordable: Vec<usize> = opponent
            .skills
            .iter()
            .enumerate()
            .filter(|(_, skill)| skill.mana_cost <= mana)
            .map(|(index, _)| index)
            .collect();

        if affordable.is_empty() {
            return OpponentAction::Skip;
        }

        let skill_index = affordable[rng.next_index(affordable.len(), "opponent skill choice")];
        let taunt = config::TAUNTS[rng.next_index(config::TAUNTS.len(), "taunt choice")];

        OpponentAction::UseSkill { skill_index, taunt }
    }
}
