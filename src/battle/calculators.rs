use crate::battle::state::TurnRng;
use crate::combatant::{Combatant, Skill};
use crate::config;

/// Fallback stat value when a combatant is missing the looked-up stat.
const DEFAULT_STAT: u16 = 50;

/// Result of one attack attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: u16,
    /// True when the hit was boosted — by the critical roll or by type
    /// effectiveness; both are surfaced identically.
    pub critical: bool,
    pub dodged: bool,
    /// Emoji tag carried into the battle log entry.
    pub flavor: &'static str,
}

/// Calculate the outcome of one attack.
///
/// Pure apart from the rolls drawn from `rng`: one dodge roll, and — only
/// when the attack connects — one critical roll. A dodge short-circuits
/// before any damage math.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &Combatant,
    skill: &Skill,
    rng: &mut TurnRng,
) -> AttackOutcome {
    if rng.next_outcome("dodge check") <= config::DODGE_CHANCE {
        return AttackOutcome {
            damage: 0,
            critical: false,
            dodged: true,
            flavor: "🛡️",
        };
    }

    let critical_roll = rng.next_outcome("critical check") <= config::CRIT_CHANCE;
    let attack = attacker.stat("attack").unwrap_or(DEFAULT_STAT);
    let defense = defender.stat("defense").unwrap_or(DEFAULT_STAT);
    let effective = defender.is_weak_to(&skill.skill_type);

    // Crit wins over effectiveness; the multipliers never stack.
    let multiplier = if critical_roll {
        config::CRIT_MULTIPLIER
    } else if effective {
        config::EFFECTIVE_MULTIPLIER
    } else {
        1.0
    };

    let raw = skill.power as i32 + attack as i32 - defense as i32;
    let damage = ((raw as f64) * multiplier).floor().max(1.0) as u16;
    let critical = effective || critical_roll;

    AttackOutcome {
        damage,
        critical,
        dodged: false,
        flavor: if critical { "⚡️" } else { "💥" },
    }
}
