use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::config;

/// Which side of the battle a value refers to. Index 0 is the human player,
/// index 1 the automated opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Explicit battle phase. Actions are only legal in the phase that expects
/// them; everything else is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    AwaitingPlayerChoice,
    AwaitingOpponentChoice,
    Resolved { winner: Side },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    AttackLanded {
        attacker: Side,
        skill: String,
        damage: u16,
        critical: bool,
        flavor: String,
        taunt: Option<String>,
    },
    AttackDodged {
        attacker: Side,
        taunt: Option<String>,
    },
    TurnSkipped {
        side: Side,
        mana_gained: u16,
    },
    BattleWon {
        winner: Side,
    },
}

impl BattleEvent {
    /// Formats the event into the human-readable battle log entry.
    pub fn format(&self, state: &BattleState) -> String {
        match self {
            BattleEvent::AttackLanded {
                attacker,
                skill,
                damage,
                critical,
                flavor,
                taunt,
            } => {
                let crit_note = if *critical { " (Critical!)" } else { "" };
                match attacker {
                    Side::Player => {
                        format!("{} You used {}. Damage: {}{}", flavor, skill, damage, crit_note)
                    }
                    Side::Opponent => {
                        let name = &state.combatants[Side::Opponent.index()].name;
                        let taunt = taunt.as_deref().unwrap_or("");
                        format!(
                            "{} {} used {}. Damage: {}{} \"{}\"",
                            flavor, name, skill, damage, crit_note, taunt
                        )
                    }
                }
            }
            BattleEvent::AttackDodged { attacker, taunt } => match attacker {
                Side::Player => "🛡️ Attack dodged!".to_string(),
                Side::Opponent => {
                    let name = &state.combatants[Side::Opponent.index()].name;
                    let taunt = taunt.as_deref().unwrap_or("");
                    format!("🛡️ {}'s attack was dodged! \"{}\"", name, taunt)
                }
            },
            BattleEvent::TurnSkipped { side, mana_gained } => match side {
                Side::Player => {
                    format!("💤 You skipped turn and regained {} mana.", mana_gained)
                }
                Side::Opponent => {
                    let name = &state.combatants[Side::Opponent.index()].name;
                    format!("💤 {} Skips turn and regains {} mana.", name, mana_gained)
                }
            },
            BattleEvent::BattleWon { winner } => {
                let name = &state.combatants[winner.index()].name;
                format!("🎉 {} wins!", name)
            }
        }
    }
}

/// Collector for the events emitted while resolving one action.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Print all events using their formatted battle-log text.
    pub fn print_formatted(&self, state: &BattleState) {
        for event in &self.events {
            println!("  {}", event.format(state));
        }
    }
}

/// Oracle of pre-drawn random outcomes in 1..=100 for one action resolution.
///
/// Production code builds a random oracle; tests script the exact rolls so
/// dodges, crits, and policy picks are deterministic.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn new_random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        // More than any single action can consume.
        let outcomes: Vec<u8> = (0..100).map(|_| rng.random_range(1..=100)).collect();
        Self { outcomes, index: 0 }
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }

    /// Map one outcome onto an index in 0..len, for uniform list picks.
    pub fn next_index(&mut self, len: usize, reason: &str) -> usize {
        assert!(len > 0, "cannot pick an index from an empty list");
        (self.next_outcome(reason) as usize - 1) % len
    }
}

/// The full mutable state of one battle session.
///
/// Combatant records are immutable after construction; hit points, mana,
/// phase, log, and flash flags are mutated exclusively by the engine's
/// transition functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub combatants: [Combatant; 2],
    pub hp: [u16; 2],
    pub max_hp: [u16; 2],
    pub mana: [u16; 2],
    pub phase: BattlePhase,
    /// Human-readable battle log, newest entry first.
    pub log: Vec<String>,
    /// Transient "just got hit" presentation flags.
    pub flash: [bool; 2],
}

impl BattleState {
    pub fn new(player: Combatant, opponent: Combatant) -> Self {
        let hp = [player.hit_points(), opponent.hit_points()];
        Self {
            combatants: [player, opponent],
            hp,
            max_hp: hp,
            mana: [config::INITIAL_MANA, config::INITIAL_MANA],
            phase: BattlePhase::AwaitingPlayerChoice,
            log: Vec::new(),
            flash: [false, false],
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, BattlePhase::Resolved { .. })
    }

    /// Name of the winning combatant, while the battle lasts `None`.
    pub fn winner(&self) -> Option<&str> {
        match self.phase {
            BattlePhase::Resolved { winner } => {
                Some(self.combatants[winner.index()].name.as_str())
            }
            _ => None,
        }
    }

    pub fn clear_flash(&mut self) {
        self.flash = [false, false];
    }
}
