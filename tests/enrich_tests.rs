mod common;

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dexprofile::data::{ChainIdEnricher, CsvRecordStore, RecordStore};
use dexprofile::reference::HttpReferenceClient;
use serde_json::json;
use wiremock::MockServer;

use common::{mount_json, mount_species, mount_status, resource};

const EXPORT: &str = "\
id,pokemon_id,name_ko,name_en,type,national_id,abilities
1,1,이상해씨,Bulbasaur,\"풀, 독\",1,overgrow;*chlorophyll
133,133,이브이,Eevee,노말,133,run-away
25,25,피카츄,Pikachu,전기,25,static
0,,미확인,,노말,,
";

fn temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("dexprofile-enrich-{name}-{stamp}.csv"))
}

async fn species_server() -> MockServer {
    let server = MockServer::start().await;
    mount_species(&server, 1, "bulbasaur", "이상해씨").await;
    mount_json(
        &server,
        "/pokemon-species/133",
        json!({
            "id": 133,
            "name": "eevee",
            "names": [],
            "evolves_from_species": null,
            "evolution_chain": { "url": "https://pokeapi.co/api/v2/evolution-chain/67/" },
            "varieties": [{ "is_default": true, "pokemon": resource("eevee", "pokemon", 133) }]
        }),
    )
    .await;
    mount_status(&server, "/pokemon-species/25", 503).await;
    server
}

#[tokio::test]
async fn fills_chain_ids_the_store_can_read_back() {
    let server = species_server().await;
    let reference = HttpReferenceClient::new(&server.uri(), Duration::from_secs(5))
        .expect("client should build");

    let (enriched, report) = ChainIdEnricher::new(&reference)
        .enrich(EXPORT)
        .await
        .expect("enrich");
    assert_eq!(report.rows, 4);
    assert_eq!(report.filled, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 1);

    let store = CsvRecordStore::from_csv_str(&enriched).expect("enriched csv should load");
    let chain_of = |record: dexprofile::data::BaseRecord| record.evolution_chain_id;
    assert_eq!(store.fetch_record(1).await.map(chain_of).ok(), Some(Some(1)));
    assert_eq!(store.fetch_record(133).await.map(chain_of).ok(), Some(Some(67)));
    assert_eq!(store.fetch_record(25).await.map(chain_of).ok(), Some(None));
    // Untouched columns survive the rewrite.
    let bulbasaur = store.fetch_record(1).await.expect("record 1");
    assert_eq!(bulbasaur.types, vec!["풀", "독"]);
    assert_eq!(bulbasaur.ability_refs().map(<[_]>::len), Some(2));
}

#[tokio::test(flavor = "multi_thread")]
async fn enrich_command_rewrites_the_file() {
    let server = species_server().await;
    let input = temp_path("input");
    let output = temp_path("output");
    fs::write(&input, EXPORT).expect("export should be written");

    let command_output = {
        let mut command = Command::new(env!("CARGO_BIN_EXE_dexprofile"));
        command
            .arg("enrich")
            .arg(&input)
            .arg(&output)
            .env("DEXPROFILE_CONFIG", temp_path("absent-config"))
            .env("DEXPROFILE_REFERENCE_URL", server.uri())
            .env("RUST_LOG", "off");
        tokio::task::spawn_blocking(move || command.output())
            .await
            .expect("command task")
            .expect("binary should run")
    };
    assert_eq!(command_output.status.code(), Some(0));
    let report: serde_json::Value =
        serde_json::from_slice(&command_output.stdout).expect("report should be json");
    assert_eq!(report["filled"], 2);

    let written = fs::read_to_string(&output).expect("output should exist");
    assert!(written.starts_with(
        "id,pokemon_id,name_ko,name_en,type,national_id,abilities,evolution_chain_id\n"
    ));
    assert!(written.contains("133,133,이브이,Eevee,노말,133,run-away,67\n"));
    assert_eq!(fs::read_to_string(&input).expect("input"), EXPORT);

    let _ = fs::remove_file(input);
    let _ = fs::remove_file(output);
}

#[test]
fn enrich_command_fails_on_missing_input() {
    let output = Command::new(env!("CARGO_BIN_EXE_dexprofile"))
        .arg("enrich")
        .arg(temp_path("missing"))
        .env("DEXPROFILE_CONFIG", temp_path("absent-config"))
        .env("RUST_LOG", "off")
        .output()
        .expect("binary should run");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("enrich failed"));
}
