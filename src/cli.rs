use std::path::Path;

use crate::config::AppConfig;
use crate::data::{ChainIdEnricher, TypeNames, DEFAULT_ENRICH_PAUSE};
use crate::error::{ProfileError, StoreError};
use crate::server;
use crate::server::api;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Profile,
    Record,
    Types,
    Enrich,
}

const USAGE: &str =
    "usage: dexprofile <serve|profile <id>|record <id>|types [--table]|enrich [csv] [output]>";

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("profile") => Some(Command::Profile),
        Some("record") => Some(Command::Record),
        Some("types") => Some(Command::Types),
        Some("enrich") => Some(Command::Enrich),
        _ => None,
    }
}

pub async fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    if command == Command::Types {
        return handle_types(args);
    }

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return 1;
        }
    };
    match command {
        Command::Serve => handle_serve(&config).await,
        Command::Profile => handle_profile(&config, args).await,
        Command::Record => handle_record(&config, args).await,
        Command::Types => handle_types(args),
        Command::Enrich => handle_enrich(&config, args).await,
    }
}

async fn handle_serve(config: &AppConfig) -> i32 {
    let assembler = match config.build_assembler() {
        Ok(assembler) => assembler,
        Err(err) => {
            eprintln!("startup failed: {err}");
            return 1;
        }
    };
    match server::run_server(&config.bind, assembler).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

async fn handle_profile(config: &AppConfig, args: &[String]) -> i32 {
    let Some(id) = parse_id_arg(args.get(2)) else {
        eprintln!("usage: dexprofile profile <id>");
        return 2;
    };
    let assembler = match config.build_assembler() {
        Ok(assembler) => assembler,
        Err(err) => {
            eprintln!("startup failed: {err}");
            return 1;
        }
    };

    match assembler.assemble(id).await {
        Ok(profile) => print_payload(api::profile_payload(&profile)),
        Err(ProfileError::NotFound(id)) => {
            eprintln!("creature {id} not found");
            1
        }
        Err(err) => {
            eprintln!("profile failed: {err}");
            1
        }
    }
}

async fn handle_record(config: &AppConfig, args: &[String]) -> i32 {
    let Some(id) = parse_id_arg(args.get(2)) else {
        eprintln!("usage: dexprofile record <id>");
        return 2;
    };
    let store = match config.build_store() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("startup failed: {err}");
            return 1;
        }
    };

    match store.fetch_record(id).await {
        Ok(record) => print_payload(api::record_payload(&record)),
        Err(StoreError::NotFound(id)) => {
            eprintln!("creature {id} not found");
            1
        }
        Err(err) => {
            eprintln!("record lookup failed: {err}");
            1
        }
    }
}

/// Fills `evolution_chain_id` in a CSV export. Defaults to rewriting the configured
/// store file in place.
async fn handle_enrich(config: &AppConfig, args: &[String]) -> i32 {
    let input = args.get(2).cloned().unwrap_or_else(|| config.store_csv.clone());
    let output = args.get(3).cloned().unwrap_or_else(|| input.clone());
    let reference = match config.build_reference() {
        Ok(reference) => reference,
        Err(err) => {
            eprintln!("startup failed: {err}");
            return 1;
        }
    };

    let enricher = ChainIdEnricher::new(&reference).with_pause(DEFAULT_ENRICH_PAUSE);
    match enricher.enrich_file(Path::new(&input), Path::new(&output)).await {
        Ok(report) => print_payload(serde_json::to_string_pretty(&report)),
        Err(err) => {
            eprintln!("enrich failed: {err}");
            1
        }
    }
}

fn handle_types(args: &[String]) -> i32 {
    if args.iter().any(|arg| arg == "--table") {
        println!("local\treference");
        for entry in TypeNames.entries() {
            println!("{}\t{}", entry.local, entry.reference);
        }
        return 0;
    }
    print_payload(api::types_payload())
}

fn print_payload(payload: Result<String, serde_json::Error>) -> i32 {
    match payload {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            1
        }
    }
}

fn parse_id_arg(raw: Option<&String>) -> Option<u32> {
    let raw = raw?;
    match raw.parse::<u32>() {
        Ok(id) => Some(id),
        Err(_) => {
            eprintln!("invalid creature id '{raw}'");
            None
        }
    }
}
