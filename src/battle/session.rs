//! Outward-facing battle session controller.
//!
//! Wires a [`CombatantSource`] to the state machine: initializes sessions,
//! delegates the player commands, paces the opponent's automatic reply, and
//! clears the transient flash flags. All battle rules live in
//! [`crate::battle::engine`]; this module only sequences them.

use std::time::Duration;

use rand::Rng;

use crate::api::CombatantSource;
use crate::battle::ai::RandomPolicy;
use crate::battle::engine;
use crate::battle::state::{BattlePhase, BattleState, EventBus, TurnRng};
use crate::combatant::Combatant;
use crate::config;
use crate::errors::FetchResult;

/// Uniform random roster id in `[1, MAX_POKEMON_ID]`.
pub fn random_combatant_id<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.random_range(1..=config::MAX_POKEMON_ID)
}

/// Delays used to pace turn resolution. Tests inject [`Pacing::immediate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub opponent_delay: Duration,
    pub flash_clear: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            opponent_delay: Duration::from_millis(config::OPPONENT_DELAY_MS),
            flash_clear: Duration::from_millis(config::FLASH_CLEAR_MS),
        }
    }
}

impl Pacing {
    pub fn immediate() -> Self {
        Self {
            opponent_delay: Duration::ZERO,
            flash_clear: Duration::ZERO,
        }
    }
}

/// One battle session: combatant acquisition, command handling, restart.
#[derive(Debug)]
pub struct BattleSession<S> {
    source: S,
    policy: RandomPolicy,
    pacing: Pacing,
    state: Option<BattleState>,
    player_combatant: Option<Combatant>,
    loading: bool,
    /// Bumped on every (re)initialization; a delayed resolution belonging to
    /// a superseded generation is discarded instead of clobbering the new
    /// session.
    generation: u64,
}

impl<S: CombatantSource> BattleSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            policy: RandomPolicy::new(),
            pacing: Pacing::default(),
            state: None,
            player_combatant: None,
            loading: true,
            generation: 0,
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Carry a combatant over from the library as the player's side.
    pub fn with_player_combatant(mut self, combatant: Combatant) -> Self {
        self.player_combatant = Some(combatant);
        self
    }

    /// Fetch combatants and seed fresh battle state.
    ///
    /// On failure the loading flag stays set and the error is returned;
    /// calling `initialize` again retries.
    pub async fn initialize(&mut self) -> FetchResult<()> {
        self.loading = true;
        self.generation = self.generation.wrapping_add(1);

        let state = match &self.player_combatant {
            Some(player) => {
                let id = {
                    let mut rng = rand::rng();
                    random_combatant_id(&mut rng)
                };
                let opponent = self.source.fetch_combatant(id).await?;
                BattleState::new(player.clone(), opponent)
            }
            None => {
                let (first_id, second_id) = {
                    let mut rng = rand::rng();
                    (random_combatant_id(&mut rng), random_combatant_id(&mut rng))
                };
                let (player, opponent) = tokio::try_join!(
                    self.source.fetch_combatant(first_id),
                    self.source.fetch_combatant(second_id)
                )?;
                BattleState::new(player, opponent)
            }
        };

        self.state = Some(state);
        self.loading = false;
        Ok(())
    }

    /// Replace the carried-over player combatant and re-initialize.
    pub async fn set_player_combatant(&mut self, combatant: Combatant) -> FetchResult<()> {
        self.player_combatant = Some(combatant);
        self.initialize().await
    }

    /// Full re-initialization: new combatants, reset hp/mana/log/phase.
    pub async fn restart(&mut self) -> FetchResult<()> {
        self.initialize().await
    }

    /// Attack with the skill in the given slot, then let the opponent reply.
    /// Illegal selections (wrong phase, unaffordable, bad index) return an
    /// empty bus and change nothing.
    pub async fn select_skill(&mut self, skill_index: usize) -> EventBus {
        let Some(state) = self.state.as_mut() else {
            return EventBus::new();
        };
        let mut rng = TurnRng::new_random();
        let mut bus = engine::player_use_skill(state, skill_index, &mut rng);
        if bus.is_empty() {
            return bus;
        }
        self.settle_turn(&mut bus).await;
        bus
    }

    /// Pass the turn for mana, then let the opponent reply.
    pub async fn skip_turn(&mut self) -> EventBus {
        let Some(state) = self.state.as_mut() else {
            return EventBus::new();
        };
        let mut bus = engine::player_skip_turn(state);
        if bus.is_empty() {
            return bus;
        }
        self.settle_turn(&mut bus).await;
        bus
    }

    /// Run the paced aftermath of a player action: clear the hit flash and
    /// resolve the opponent's automatic turn.
    async fn settle_turn(&mut self, bus: &mut EventBus) {
        let generation = self.generation;

        if self.flash_pending() {
            tokio::time::sleep(self.pacing.flash_clear).await;
            if self.generation != generation {
                return;
            }
            if let Some(state) = self.state.as_mut() {
                state.clear_flash();
            }
        }

        let awaiting_opponent = self
            .state
            .as_ref()
            .is_some_and(|state| state.phase == BattlePhase::AwaitingOpponentChoice);
        if !awaiting_opponent {
            return;
        }

        tokio::time::sleep(self.pacing.opponent_delay).await;
        if self.generation != generation {
            // A restart superseded this session while the delay was pending.
            return;
        }

        let policy = self.policy;
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let mut rng = TurnRng::new_random();
        let reply = engine::opponent_take_turn(state, &policy, &mut rng);
        for event in reply.into_events() {
            bus.push(event);
        }

        if self.flash_pending() {
            tokio::time::sleep(self.pacing.flash_clear).await;
            if self.generation == generation {
                if let Some(state) = self.state.as_mut() {
                    state.clear_flash();
                }
            }
        }
    }

    fn flash_pending(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.flash.iter().any(|&flag| flag))
    }

    pub fn state(&self) -> Option<&BattleState> {
        self.state.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn winner(&self) -> Option<&str> {
        self.state.as_ref().and_then(|state| state.winner())
    }

    /// The battle log, newest entry first. Empty before initialization.
    pub fn battle_log(&self) -> &[String] {
        self.state
            .as_ref()
            .map(|state| state.log.as_slice())
            .unwrap_or(&[])
    }
}
