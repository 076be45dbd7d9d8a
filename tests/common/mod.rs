//! Shared fixtures: a wiremock reference service serving real-shaped payloads.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use dexprofile::data::{AbilityRef, BaseRecord, CsvRecordStore};
use dexprofile::profile::{AssemblerSettings, DetailAssembler};
use dexprofile::reference::HttpReferenceClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn resource(name: &str, kind: &str, id: u32) -> Value {
    json!({ "name": name, "url": format!("https://pokeapi.co/api/v2/{kind}/{id}/") })
}

fn named(name: &str) -> Value {
    json!({ "name": name, "url": format!("https://pokeapi.co/api/v2/type/{name}/") })
}

fn named_list(names: &[&str]) -> Vec<Value> {
    names.iter().map(|n| named(n)).collect()
}

fn language(code: &str) -> Value {
    json!({ "name": code, "url": "https://pokeapi.co/api/v2/language/1/" })
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn mount_type(
    server: &MockServer,
    name: &str,
    double: &[&str],
    half: &[&str],
    none: &[&str],
) {
    mount_json(
        server,
        &format!("/type/{name}"),
        json!({
            "id": 1,
            "name": name,
            "damage_relations": {
                "double_damage_from": named_list(double),
                "double_damage_to": [],
                "half_damage_from": named_list(half),
                "half_damage_to": [],
                "no_damage_from": named_list(none),
                "no_damage_to": []
            }
        }),
    )
    .await;
}

pub async fn mount_species(server: &MockServer, id: u32, canonical: &str, ko: &str) {
    mount_json(
        server,
        &format!("/pokemon-species/{id}"),
        json!({
            "id": id,
            "name": canonical,
            "names": [
                { "name": canonical, "language": language("en") },
                { "name": ko, "language": language("ko") }
            ],
            "evolution_chain": { "url": "https://pokeapi.co/api/v2/evolution-chain/1/" }
        }),
    )
    .await;
}

pub async fn mount_ability(server: &MockServer, name: &str, ko_name: &str, ko_flavor: &str) {
    mount_json(
        server,
        &format!("/ability/{name}"),
        json!({
            "id": 65,
            "name": name,
            "names": [
                { "name": ko_name, "language": language("ko") }
            ],
            "flavor_text_entries": [
                { "flavor_text": ko_flavor, "language": language("ko"),
                  "version_group": { "name": "x-y", "url": "" } }
            ],
            "effect_entries": []
        }),
    )
    .await;
}

pub fn bulbasaur_chain() -> Value {
    json!({
        "id": 1,
        "baby_trigger_item": null,
        "chain": {
            "is_baby": false,
            "species": resource("bulbasaur", "pokemon-species", 1),
            "evolution_details": [],
            "evolves_to": [{
                "is_baby": false,
                "species": resource("ivysaur", "pokemon-species", 2),
                "evolution_details": [{
                    "min_level": 16,
                    "item": null,
                    "trigger": { "name": "level-up", "url": "" }
                }],
                "evolves_to": [{
                    "is_baby": false,
                    "species": resource("venusaur", "pokemon-species", 3),
                    "evolution_details": [{
                        "min_level": 32,
                        "item": null,
                        "trigger": { "name": "level-up", "url": "" }
                    }],
                    "evolves_to": []
                }]
            }]
        }
    })
}

/// Reference service with everything record 1 (grass/poison starter) needs.
pub async fn reference_server() -> MockServer {
    let server = MockServer::start().await;
    mount_type(
        &server,
        "grass",
        &["flying", "poison", "bug", "fire", "ice"],
        &["ground", "water", "grass", "electric"],
        &[],
    )
    .await;
    mount_type(
        &server,
        "poison",
        &["ground", "psychic"],
        &["fighting", "poison", "bug", "grass", "fairy"],
        &[],
    )
    .await;
    mount_species(&server, 1, "bulbasaur", "이상해씨").await;
    mount_species(&server, 2, "ivysaur", "이상해풀").await;
    mount_species(&server, 3, "venusaur", "이상해꽃").await;
    mount_ability(&server, "overgrow", "심록", "HP가 줄었을 때\n풀타입 기술의 위력이 올라간다.").await;
    mount_ability(&server, "chlorophyll", "엽록소", "날씨가 맑을 때\n스피드가 올라간다.").await;
    mount_json(&server, "/evolution-chain/1", bulbasaur_chain()).await;
    mount_json(
        &server,
        "/pokemon/1",
        json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "stats": [
                { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
                { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "" } }
            ]
        }),
    )
    .await;
    server
}

pub fn bulbasaur_record() -> BaseRecord {
    let mut record = BaseRecord::new(1, "이상해씨", &["풀", "독"]);
    record.canonical_name = Some("Bulbasaur".to_string());
    record.reference_id = Some(1);
    record.evolution_chain_id = Some(1);
    record.abilities = Some(vec![
        AbilityRef::new("overgrow", false),
        AbilityRef::new("chlorophyll", true),
    ]);
    record
}

pub fn assembler_for(
    server: &MockServer,
    records: Vec<BaseRecord>,
    settings: AssemblerSettings,
) -> DetailAssembler {
    let reference = HttpReferenceClient::new(&server.uri(), Duration::from_secs(5))
        .expect("reference client should build");
    DetailAssembler::new(
        Arc::new(CsvRecordStore::from_records(records)),
        Arc::new(reference),
        settings,
    )
}
