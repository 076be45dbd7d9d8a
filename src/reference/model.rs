//! Wire shapes of the reference data service. Only the fields this crate reads are
//! modelled; everything else in the payloads is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Trailing id segment of the resource URL (`.../pokemon-species/25/` -> `25`).
    /// Falls back to the resource name when the URL has no path segment.
    pub fn id(&self) -> &str {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty() && !segment.contains(':'))
            .unwrap_or(self.name.as_str())
    }
}

/// Anything tagged with a language.
pub trait Localized {
    fn language(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language: NamedResource,
}

impl Localized for LocalizedName {
    fn language(&self) -> &str {
        &self.language.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

impl Localized for FlavorTextEntry {
    fn language(&self) -> &str {
        &self.language.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectEntry {
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub short_effect: String,
    pub language: NamedResource,
}

impl Localized for EffectEntry {
    fn language(&self) -> &str {
        &self.language.name
    }
}

/// `GET /species/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesRecord {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub evolution_chain: Option<ChainReference>,
}

/// Link from a species to the evolution chain it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainReference {
    pub url: String,
}

impl ChainReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Numeric trailing segment of the chain URL (`.../evolution-chain/67/` -> 67).
    pub fn id(&self) -> Option<u32> {
        self.url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
    }
}

/// `GET /type/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRecord {
    #[serde(default)]
    pub name: String,
    pub damage_relations: DamageRelations,
}

/// Attacking types that deal x2, x0.5 or x0 against one defending type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_from: Vec<NamedResource>,
}

/// `GET /ability/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityRecord {
    pub name: String,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

/// `GET /evolution-chain/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionChainRecord {
    #[serde(default)]
    pub id: u32,
    pub chain: ChainLink,
}

/// One node of the chain graph: a species plus the edges leaving it. The trigger
/// details describe the edge that led *into* this node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default, alias = "next_evolution")]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionDetail {
    #[serde(default)]
    pub min_level: Option<u32>,
    #[serde(default)]
    pub item: Option<NamedResource>,
    #[serde(default)]
    pub trigger: Option<NamedResource>,
}

/// `GET /pokemon/{id}`: extended metadata shown next to the local record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureDetails {
    #[serde(default)]
    pub id: u32,
    /// Decimetres.
    #[serde(default)]
    pub height: u32,
    /// Hectograms.
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}
