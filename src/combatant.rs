use crate::api::PokemonPayload;
use crate::config;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single named stat value, already amplified to the minigame's scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: u16,
}

/// A usable battle skill, generated once per combatant and fixed afterwards.
///
/// `accuracy` is carried for completeness but the damage resolver never reads
/// it; dodging is governed by its own fixed probability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub power: u16,
    pub accuracy: u8,
    pub skill_type: String,
    pub mana_cost: u16,
}

/// A battle-ready creature built from the external data source.
///
/// Immutable after construction: all mutable battle state (hit points, mana)
/// lives in [`crate::battle::state::BattleState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: u16,
    pub name: String,
    pub stats: Vec<Stat>,
    pub types: Vec<String>,
    pub weaknesses: Vec<String>,
    pub skills: Vec<Skill>,
    pub sprite: Option<String>,
}

impl Combatant {
    /// Build a combatant from a raw API payload plus the `double_damage_from`
    /// lists fetched for each of its types (in type order).
    ///
    /// Skill generation is the only random part: the level-up move list is
    /// shuffled, the first four taken, and each gets a mana cost rolled in
    /// [`config::MANA_COST_MIN`], [`config::MANA_COST_MAX`].
    pub fn from_payload<R: Rng + ?Sized>(
        payload: &PokemonPayload,
        damage_relations: &[Vec<String>],
        rng: &mut R,
    ) -> Self {
        let stats = payload
            .stats
            .iter()
            .map(|slot| Stat {
                name: slot.stat.name.clone(),
                value: slot.base_stat * config::STAT_MULTIPLIER,
            })
            .collect();

        let types: Vec<String> = payload
            .types
            .iter()
            .map(|slot| slot.type_info.name.clone())
            .collect();
        let primary_type = types.first().cloned().unwrap_or_default();

        // Only moves learnable by levelling up become skills.
        let mut move_names: Vec<String> = payload
            .moves
            .iter()
            .filter(|slot| {
                slot.version_group_details
                    .first()
                    .map_or(false, |detail| detail.move_learn_method.name == "level-up")
            })
            .map(|slot| slot.move_info.name.clone())
            .collect();
        move_names.shuffle(rng);

        let skills = move_names
            .into_iter()
            .take(config::SKILL_SLOTS)
            .map(|name| Skill {
                name,
                power: config::SKILL_POWER,
                accuracy: 100,
                skill_type: primary_type.clone(),
                mana_cost: rng.random_range(config::MANA_COST_MIN..=config::MANA_COST_MAX),
            })
            .collect();

        // Union of double-damage-from across the combatant's types,
        // deduplicated in first-seen order.
        let mut weaknesses: Vec<String> = Vec::new();
        for relation in damage_relations {
            for type_name in relation {
                if !weaknesses.contains(type_name) {
                    weaknesses.push(type_name.clone());
                }
            }
        }

        Combatant {
            id: payload.id,
            name: payload.name.clone(),
            stats,
            types,
            weaknesses,
            skills,
            sprite: payload.sprite(),
        }
    }

    /// Look up a stat value by name.
    pub fn stat(&self, name: &str) -> Option<u16> {
        self.stats
            .iter()
            .find(|stat| stat.name == name)
            .map(|stat| stat.value)
    }

    /// Starting hit points for a battle session.
    pub fn hit_points(&self) -> u16 {
        self.stat("hp").unwrap_or(100)
    }

    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    pub fn is_weak_to(&self, type_name: &str) -> bool {
        self.weaknesses.iter().any(|t| t == type_name)
    }
}
