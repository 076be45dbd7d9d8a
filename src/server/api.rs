use serde::Serialize;

use crate::data::{BaseRecord, StatLine, TypeNameEntry, TypeNames};
use crate::profile::{CreatureProfile, DamageProfile};

#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse<'a> {
    pub status: &'static str,
    pub record: &'a BaseRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse<'a> {
    pub status: &'static str,
    pub profile: &'a CreatureProfile,
    /// `profile.damage` with local type display names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_matchups: Option<DamageProfile>,
    /// `profile.stats.base_stats` with display labels and bar ratios.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat_lines: Option<Vec<StatLine>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypesResponse {
    pub status: &'static str,
    pub types: Vec<TypeNameEntry>,
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "dexprofile-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn record_payload(record: &BaseRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&RecordResponse {
        status: "ok",
        record,
    })
}

pub fn profile_payload(profile: &CreatureProfile) -> Result<String, serde_json::Error> {
    let names = TypeNames;
    serde_json::to_string_pretty(&ProfileResponse {
        status: "ok",
        profile,
        type_matchups: profile.damage.as_ref().map(|damage| damage.localized(&names)),
        stat_lines: profile.stats.as_ref().map(|stats| {
            stats
                .base_stats
                .iter()
                .map(|stat| StatLine::new(&stat.name, stat.value))
                .collect()
        }),
    })
}

pub fn types_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TypesResponse {
        status: "ok",
        types: TypeNames.entries(),
    })
}
