//! Fixed gameplay constants for the battle minigame.
//!
//! Everything that tunes the feel of a battle lives here so the engine,
//! policy, and session code never hard-code numbers inline.

/// Base URL of the public species data API.
pub const API_URL: &str = "https://pokeapi.co/api/v2";

/// Highest creature id the roster draws from (original 151).
pub const MAX_POKEMON_ID: u16 = 151;

/// Starting mana for both combatants. Also the mana ceiling: regeneration
/// never pushes mana above this value.
pub const INITIAL_MANA: u16 = 100;

/// Mana regained by skipping a turn.
pub const SKIP_MANA_GAIN: u16 = 30;

/// Raw API base stats are amplified by this factor to fit the minigame's
/// damage scale.
pub const STAT_MULTIPLIER: u16 = 3;

/// Every generated skill has this fixed power.
pub const SKILL_POWER: u16 = 25;

/// Number of skill slots filled from the shuffled level-up move list.
pub const SKILL_SLOTS: usize = 4;

/// Mana cost bounds for generated skills, rolled once at generation time.
pub const MANA_COST_MIN: u16 = 20;
pub const MANA_COST_MAX: u16 = 40;

/// Percent chance (roll <= threshold out of 100) that an attack is dodged.
pub const DODGE_CHANCE: u8 = 25;

/// Percent chance (roll <= threshold out of 100) of a critical hit.
pub const CRIT_CHANCE: u8 = 5;

/// Damage multiplier when the skill type hits a weakness.
pub const EFFECTIVE_MULTIPLIER: f64 = 1.25;

/// Damage multiplier on a critical hit. Takes precedence over the
/// effectiveness multiplier; the two never stack.
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// Pacing delay before the opponent's automatic turn resolves.
pub const OPPONENT_DELAY_MS: u64 = 1200;

/// How long the "just got hit" flash stays visible.
pub const FLASH_CLEAR_MS: u64 = 400;

/// Lines the opponent may shout alongside an attack.
pub const TAUNTS: [&str; 6] = [
    "Take that!",
    "You can't beat me!",
    "Feel my power!",
    "Is that all you've got?",
    "Prepare to lose!",
    "I'm just getting started!",
];
