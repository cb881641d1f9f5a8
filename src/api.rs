//! Client for the public species data API.
//!
//! Wire structs mirror the JSON shapes the API actually returns; everything
//! battle-facing is converted into [`Combatant`] before it leaves this module.

use std::future::Future;

use serde::Deserialize;

use crate::combatant::Combatant;
use crate::config;
use crate::errors::{FetchError, FetchResult};

/// A `{name, url}` pair, the API's universal reference shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonPayload {
    pub id: u16,
    pub name: String,
    pub stats: Vec<StatSlot>,
    pub types: Vec<TypeSlot>,
    pub moves: Vec<MoveSlot>,
    pub sprites: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_info: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_info: NamedResource,
    pub version_group_details: Vec<VersionGroupDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionGroupDetail {
    pub move_learn_method: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypePayload {
    pub damage_relations: DamageRelations,
    #[serde(default)]
    pub pokemon: Vec<TypeMemberSlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DamageRelations {
    pub double_damage_from: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeMemberSlot {
    pub pokemon: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListPayload {
    pub results: Vec<NamedResource>,
}

impl PokemonPayload {
    /// The default front sprite, when the API carries one.
    pub fn sprite(&self) -> Option<String> {
        self.sprites
            .pointer("/front_default")
            .and_then(|value| value.as_str())
            .map(|s| s.to_string())
    }
}

/// Anything that can produce a battle-ready combatant for an id.
///
/// The session controller is generic over this seam so tests can battle
/// fixture combatants without touching the network.
pub trait CombatantSource {
    fn fetch_combatant(&self, id: u16) -> impl Future<Output = FetchResult<Combatant>> + Send;
}

/// Reqwest-backed client for the live API.
#[derive(Debug, Clone)]
pub struct PokeApi {
    base_url: String,
    client: reqwest::Client,
}

impl Default for PokeApi {
    fn default() -> Self {
        Self::new()
    }
}

impl PokeApi {
    pub fn new() -> Self {
        Self::with_base_url(config::API_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Raw per-id payload: stats, types, moves, sprites.
    pub async fn fetch_pokemon(&self, id: u16) -> FetchResult<PokemonPayload> {
        self.get_json(&format!("/pokemon/{}", id)).await
    }

    /// Types dealing double damage to the given type.
    pub async fn fetch_type_weaknesses(&self, type_name: &str) -> FetchResult<Vec<String>> {
        let payload: TypePayload = self.get_json(&format!("/type/{}", type_name)).await?;
        Ok(payload
            .damage_relations
            .double_damage_from
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    /// Names of every creature belonging to the given type.
    pub async fn fetch_type_members(&self, type_name: &str) -> FetchResult<Vec<String>> {
        let payload: TypePayload = self.get_json(&format!("/type/{}", type_name)).await?;
        Ok(payload
            .pokemon
            .into_iter()
            .map(|entry| entry.pokemon.name)
            .collect())
    }

    /// The first `limit` roster entries, in pokedex order.
    pub async fn fetch_index(&self, limit: u16) -> FetchResult<Vec<NamedResource>> {
        let payload: ListPayload = self.get_json(&format!("/pokemon?limit={}", limit)).await?;
        Ok(payload.results)
    }
}

impl CombatantSource for PokeApi {
    fn fetch_combatant(&self, id: u16) -> impl Future<Output = FetchResult<Combatant>> + Send {
        async move {
            let payload = self.fetch_pokemon(id).await?;

            // One extra fetch per type to derive the weakness set.
            let mut damage_relations = Vec::with_capacity(payload.types.len());
            for slot in &payload.types {
                damage_relations.push(self.fetch_type_weaknesses(&slot.type_info.name).await?);
            }

            let mut rng = rand::rng();
            Ok(Combatant::from_payload(&payload, &damage_relations, &mut rng))
        }
    }
}
