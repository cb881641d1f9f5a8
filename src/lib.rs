//! PokeHub battle core
//!
//! A Pokémon reference and minigame core: combatants built from the public
//! species data API, a per-creature annotation store, and a turn-based
//! battle engine with an explicit state machine, a pure damage resolver,
//! and a random opponent policy.

// --- MODULE DECLARATIONS ---
pub mod annotations;
pub mod api;
pub mod battle;
pub mod combatant;
pub mod config;
pub mod errors;
pub mod library;

// --- PUBLIC API RE-EXPORTS ---
// The most important types, importable directly from the crate root.

// Core battle engine functions and state.
pub use battle::engine::{opponent_take_turn, player_skip_turn, player_use_skill};
pub use battle::state::{BattleEvent, BattlePhase, BattleState, EventBus, Side, TurnRng};

// Damage resolution and opponent decision-making.
pub use battle::ai::{Behavior, OpponentAction, RandomPolicy};
pub use battle::calculators::{resolve_attack, AttackOutcome};

// Session orchestration.
pub use battle::session::{random_combatant_id, BattleSession, Pacing};

// Data acquisition and the combatant model.
pub use api::{CombatantSource, PokeApi};
pub use combatant::{Combatant, Skill, Stat};
pub use library::LibraryIndex;

// Annotation storage.
pub use annotations::{
    AboutInfo, AnnotationStore, FileAnnotationStore, MemoryAnnotationStore,
};

// Crate-specific error and result types.
pub use errors::{
    AnnotationError, AnnotationResult, FetchError, FetchResult, PokehubError, PokehubResult,
};
