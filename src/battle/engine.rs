//! Transition functions of the battle state machine.
//!
//! Each function validates the phase it is called in, applies the action,
//! appends formatted entries to the battle log, and returns the emitted
//! events. An action that is not legal right now (wrong phase, unaffordable
//! skill, bad index) is a silent no-op: the returned bus is empty and the
//! state untouched.

use crate::battle::ai::{Behavior, OpponentAction};
use crate::battle::calculators::resolve_attack;
use crate::battle::state::{BattleEvent, BattlePhase, BattleState, EventBus, Side, TurnRng};
use crate::combatant::Skill;
use crate::config;

/// The human player attacks with the skill in the given slot.
pub fn player_use_skill(state: &mut BattleState, skill_index: usize, rng: &mut TurnRng) -> EventBus {
    let mut bus = EventBus::new();
    if state.phase != BattlePhase::AwaitingPlayerChoice {
        return bus;
    }
    let Some(skill) = state.combatants[Side::Player.index()]
        .skills
        .get(skill_index)
        .cloned()
    else {
        return bus;
    };
    // Insufficient mana is ignored, not an error.
    if state.mana[Side::Player.index()] < skill.mana_cost {
        return bus;
    }

    apply_attack(state, Side::Player, &skill, None, rng, &mut bus);
    bus
}

/// The human player passes, trading the turn for mana.
pub fn player_skip_turn(state: &mut BattleState) -> EventBus {
    let mut bus = EventBus::new();
    if state.phase != BattlePhase::AwaitingPlayerChoice {
        return bus;
    }
    apply_skip(state, Side::Player, &mut bus);
    bus
}

/// Resolve the opponent's automatic turn with the given policy.
pub fn opponent_take_turn(
    state: &mut BattleState,
    policy: &impl Behavior,
    rng: &mut TurnRng,
) -> EventBus {
    let mut bus = EventBus::new();
    if state.phase != BattlePhase::AwaitingOpponentChoice {
        return bus;
    }

    match policy.decide_action(state, rng) {
        OpponentAction::Skip => apply_skip(state, Side::Opponent, &mut bus),
        OpponentAction::UseSkill { skill_index, taunt } => {
            let Some(skill) = state.combatants[Side::Opponent.index()]
                .skills
                .get(skill_index)
                .cloned()
            else {
                return bus;
            };
            apply_attack(
                state,
                Side::Opponent,
                &skill,
                Some(taunt.to_string()),
                rng,
                &mut bus,
            );
        }
    }
    bus
}

fn apply_attack(
    state: &mut BattleState,
    attacker: Side,
    skill: &Skill,
    taunt: Option<String>,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender = attacker.opponent();
    let outcome = resolve_attack(
        &state.combatants[attacker.index()],
        &state.combatants[defender.index()],
        skill,
        rng,
    );

    // The skill was spent whether or not it connected.
    state.mana[attacker.index()] = state.mana[attacker.index()].saturating_sub(skill.mana_cost);

    if outcome.dodged {
        emit(state, bus, BattleEvent::AttackDodged { attacker, taunt });
        state.phase = awaiting_choice(defender);
        return;
    }

    state.hp[defender.index()] = state.hp[defender.index()].saturating_sub(outcome.damage);
    state.flash[defender.index()] = true;
    emit(
        state,
        bus,
        BattleEvent::AttackLanded {
            attacker,
            skill: skill.name.clone(),
            damage: outcome.damage,
            critical: outcome.critical,
            flavor: outcome.flavor.to_string(),
            taunt,
        },
    );

    // Win check runs before any turn flip, so a fatal blow skips the
    // defender's turn entirely.
    if state.hp[defender.index()] == 0 {
        state.phase = BattlePhase::Resolved { winner: attacker };
        emit(state, bus, BattleEvent::BattleWon { winner: attacker });
    } else {
        state.phase = awaiting_choice(defender);
    }
}

fn apply_skip(state: &mut BattleState, side: Side, bus: &mut EventBus) {
    let index = side.index();
    state.mana[index] = (state.mana[index] + config::SKIP_MANA_GAIN).min(config::INITIAL_MANA);
    emit(
        state,
        bus,
        BattleEvent::TurnSkipped {
            side,
            mana_gained: config::SKIP_MANA_GAIN,
        },
    );
    state.phase = awaiting_choice(side.opponent());
}

fn awaiting_choice(side: Side) -> BattlePhase {
    match side {
        Side::Player => BattlePhase::AwaitingPlayerChoice,
        Side::Opponent => BattlePhase::AwaitingOpponentChoice,
    }
}

/// Record the event in the battle log (newest first) and on the bus.
fn emit(state: &mut BattleState, bus: &mut EventBus, event: BattleEvent) {
    let line = event.format(state);
    state.log.insert(0, line);
    bus.push(event);
}
