//! In-memory reference service and payload builders for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::UpstreamError;
use crate::reference::model::{
    AbilityRecord, ChainLink, ChainReference, CreatureDetails, DamageRelations, EffectEntry,
    EvolutionChainRecord, EvolutionDetail, FlavorTextEntry, LocalizedName, NamedResource,
    SpeciesRecord, StatEntry, TypeRecord,
};
use crate::reference::ReferenceService;

#[derive(Default)]
pub struct FakeReference {
    pub species: HashMap<String, SpeciesRecord>,
    pub types: HashMap<String, TypeRecord>,
    pub abilities: HashMap<String, AbilityRecord>,
    pub chains: HashMap<u32, EvolutionChainRecord>,
    pub creatures: HashMap<u32, CreatureDetails>,
    /// Keys (`"type/fire"`, `"ability/x"`, ...) that respond with HTTP 500.
    pub failing: HashSet<String>,
    /// Keys whose response is delayed.
    pub delays: HashMap<String, Duration>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeReference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, name: &str, double: &[&str], half: &[&str], none: &[&str]) -> Self {
        self.types.insert(name.to_string(), type_record(name, double, half, none));
        self
    }

    pub fn with_species(mut self, id: &str, canonical: &str, localized: &[(&str, &str)]) -> Self {
        self.species.insert(
            id.to_string(),
            SpeciesRecord {
                id: id.parse().unwrap_or(0),
                name: canonical.to_string(),
                names: localized.iter().map(|(text, lang)| name(text, lang)).collect(),
                evolution_chain: None,
            },
        );
        self
    }

    /// Species linked to evolution chain `chain_id`.
    pub fn with_species_in_chain(mut self, id: &str, canonical: &str, chain_id: u32) -> Self {
        self = self.with_species(id, canonical, &[]);
        if let Some(species) = self.species.get_mut(id) {
            species.evolution_chain = Some(ChainReference::new(format!(
                "https://pokeapi.co/api/v2/evolution-chain/{chain_id}/"
            )));
        }
        self
    }

    pub fn with_ability(mut self, record: AbilityRecord) -> Self {
        self.abilities.insert(record.name.clone(), record);
        self
    }

    pub fn with_chain(mut self, id: u32, chain: ChainLink) -> Self {
        self.chains.insert(id, EvolutionChainRecord { id, chain });
        self
    }

    pub fn with_creature(mut self, id: u32, height: u32, weight: u32) -> Self {
        self.creatures.insert(
            id,
            CreatureDetails {
                id,
                height,
                weight,
                stats: vec![
                    StatEntry {
                        base_stat: 45,
                        stat: NamedResource::new("hp", ""),
                    },
                    StatEntry {
                        base_stat: 49,
                        stat: NamedResource::new("attack", ""),
                    },
                ],
            },
        );
        self
    }

    pub fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn delayed(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    async fn respond<T: Clone>(&self, key: String, found: Option<&T>) -> Result<T, UpstreamError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(key.clone());
        }
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        let status = if self.failing.contains(&key) { 500 } else { 404 };
        match found {
            Some(value) if status != 500 => Ok(value.clone()),
            _ => Err(UpstreamError::Status {
                url: format!("fake://{key}"),
                status,
            }),
        }
    }
}

#[async_trait]
impl ReferenceService for FakeReference {
    async fn fetch_species(&self, id: &str) -> Result<SpeciesRecord, UpstreamError> {
        self.respond(format!("species/{id}"), self.species.get(id)).await
    }

    async fn fetch_type(&self, name: &str) -> Result<TypeRecord, UpstreamError> {
        self.respond(format!("type/{name}"), self.types.get(name)).await
    }

    async fn fetch_ability(&self, id: &str) -> Result<AbilityRecord, UpstreamError> {
        self.respond(format!("ability/{id}"), self.abilities.get(id)).await
    }

    async fn fetch_evolution_chain(&self, id: u32) -> Result<EvolutionChainRecord, UpstreamError> {
        self.respond(format!("evolution-chain/{id}"), self.chains.get(&id)).await
    }

    async fn fetch_creature(&self, id: u32) -> Result<CreatureDetails, UpstreamError> {
        self.respond(format!("pokemon/{id}"), self.creatures.get(&id)).await
    }
}

pub fn name(text: &str, language: &str) -> LocalizedName {
    LocalizedName {
        name: text.to_string(),
        language: NamedResource::new(language, ""),
    }
}

pub fn flavor(text: &str, language: &str) -> FlavorTextEntry {
    FlavorTextEntry {
        flavor_text: text.to_string(),
        language: NamedResource::new(language, ""),
    }
}

pub fn effect(short_effect: &str, effect: &str, language: &str) -> EffectEntry {
    EffectEntry {
        effect: effect.to_string(),
        short_effect: short_effect.to_string(),
        language: NamedResource::new(language, ""),
    }
}

fn resources(names: &[&str]) -> Vec<NamedResource> {
    names.iter().map(|n| NamedResource::new(*n, "")).collect()
}

pub fn type_record(name: &str, double: &[&str], half: &[&str], none: &[&str]) -> TypeRecord {
    TypeRecord {
        name: name.to_string(),
        damage_relations: DamageRelations {
            double_damage_from: resources(double),
            half_damage_from: resources(half),
            no_damage_from: resources(none),
        },
    }
}

pub fn species_ref(id: &str, canonical: &str) -> NamedResource {
    NamedResource::new(
        canonical,
        format!("https://pokeapi.co/api/v2/pokemon-species/{id}/"),
    )
}

/// Chain node with the given incoming edge details and children.
pub fn link(
    id: &str,
    canonical: &str,
    details: Vec<EvolutionDetail>,
    children: Vec<ChainLink>,
) -> ChainLink {
    ChainLink {
        species: species_ref(id, canonical),
        evolution_details: details,
        evolves_to: children,
    }
}

pub fn level_up(min_level: u32) -> EvolutionDetail {
    EvolutionDetail {
        min_level: Some(min_level),
        item: None,
        trigger: Some(NamedResource::new("level-up", "")),
    }
}

pub fn use_item(item: &str) -> EvolutionDetail {
    EvolutionDetail {
        min_level: None,
        item: Some(NamedResource::new(item, "")),
        trigger: Some(NamedResource::new("use-item", "")),
    }
}

/// Grass / poison starter line: 1 -(Lv16)-> 2 -(Lv32)-> 3.
pub fn three_stage_chain() -> ChainLink {
    link(
        "1",
        "bulbasaur",
        vec![],
        vec![link(
            "2",
            "ivysaur",
            vec![level_up(16)],
            vec![link("3", "venusaur", vec![level_up(32)], vec![])],
        )],
    )
}

/// Reference data for the standard type matchups used across tests.
pub fn type_chart() -> FakeReference {
    FakeReference::new()
        .with_type(
            "grass",
            &["flying", "poison", "bug", "fire", "ice"],
            &["ground", "water", "grass", "electric"],
            &[],
        )
        .with_type(
            "poison",
            &["ground", "psychic"],
            &["fighting", "poison", "bug", "grass", "fairy"],
            &[],
        )
        .with_type(
            "fire",
            &["ground", "rock", "water"],
            &["bug", "steel", "fire", "grass", "ice", "fairy"],
            &[],
        )
        .with_type(
            "flying",
            &["rock", "electric", "ice"],
            &["fighting", "bug", "grass"],
            &["ground"],
        )
        .with_type("ghost", &["ghost", "dark"], &["poison", "bug"], &["normal", "fighting"])
}
