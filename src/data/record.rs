//! Local creature record as served by the record store (`GET /creature/{id}`).
//! Field aliases accept the store's column names (`name_ko`, `national_id`, ...).

use serde::{Deserialize, Deserializer, Serialize};

/// Reference to one ability of a creature, by reference-service name or id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRef {
    pub name: String,
    #[serde(default)]
    pub is_hidden: bool,
}

impl AbilityRef {
    pub fn new(name: impl Into<String>, is_hidden: bool) -> Self {
        Self {
            name: name.into(),
            is_hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRecord {
    pub id: u32,
    /// Dex number shown to users; not used for lookups.
    #[serde(default, alias = "pokemon_id", skip_serializing_if = "Option::is_none")]
    pub dex_number: Option<u32>,
    #[serde(alias = "name_ko")]
    pub name: String,
    #[serde(default, alias = "name_en", skip_serializing_if = "Option::is_none")]
    pub canonical_name: Option<String>,
    /// Own types, 1-2 entries. The store may send `"풀, 독"` or `["풀", "독"]`.
    #[serde(
        default,
        rename = "types",
        alias = "type",
        deserialize_with = "deserialize_type_list"
    )]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, alias = "national_id", skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolution_chain_id: Option<u32>,
    #[serde(default, alias = "ability_refs", skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<AbilityRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<String>,
}

impl BaseRecord {
    /// Minimal record; the remaining fields default to absent.
    pub fn new(id: u32, name: impl Into<String>, types: &[&str]) -> Self {
        Self {
            id,
            dex_number: None,
            name: name.into(),
            canonical_name: None,
            types: types.iter().map(|t| t.to_string()).collect(),
            description: None,
            image_url: None,
            reference_id: None,
            evolution_chain_id: None,
            abilities: None,
            role: None,
            feature: None,
            appearance: None,
        }
    }

    /// Ability refs, only when present and non-empty.
    pub fn ability_refs(&self) -> Option<&[AbilityRef]> {
        self.abilities.as_deref().filter(|refs| !refs.is_empty())
    }
}

/// Split a joined type string (`"풀, 독"`) into trimmed, non-empty names.
pub fn split_type_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeField {
    Joined(String),
    List(Vec<String>),
}

fn deserialize_type_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field: Option<TypeField> = Option::deserialize(deserializer)?;
    Ok(match field {
        Some(TypeField::Joined(raw)) => split_type_list(&raw),
        Some(TypeField::List(list)) => list
            .iter()
            .flat_map(|entry| split_type_list(entry))
            .collect(),
        None => Vec::new(),
    })
}
