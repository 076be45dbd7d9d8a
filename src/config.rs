//! Service configuration: `dexprofile.yaml` plus `DEXPROFILE_*` environment overrides.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::{CsvRecordStore, HttpRecordStore, RecordStore, DEFAULT_RECORDS_CSV_PATH};
use crate::error::{ConfigError, StartupError};
use crate::profile::{AssemblerSettings, DetailAssembler, EvolutionMode, DEFAULT_SPRITE_TEMPLATE};
use crate::reference::{HttpReferenceClient, DEFAULT_REFERENCE_URL};

pub const DEFAULT_CONFIG_PATH: &str = "dexprofile.yaml";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind: String,
    /// Record store base URL. When unset the CSV file at `store_csv` is used.
    pub store_url: Option<String>,
    pub store_csv: String,
    pub reference_url: String,
    pub language: String,
    pub sprite_template: String,
    pub evolution_mode: EvolutionMode,
    pub deadline_ms: Option<u64>,
    pub request_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDR.to_string(),
            store_url: None,
            store_csv: DEFAULT_RECORDS_CSV_PATH.to_string(),
            reference_url: DEFAULT_REFERENCE_URL.to_string(),
            language: "ko".to_string(),
            sprite_template: DEFAULT_SPRITE_TEMPLATE.to_string(),
            evolution_mode: EvolutionMode::FirstBranch,
            deadline_ms: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Reads `DEXPROFILE_CONFIG` (or [DEFAULT_CONFIG_PATH]) and applies process
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            env::var("DEXPROFILE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load_file(&path)?;
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load_file(path: &str) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_string(),
                source,
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path, "no config file; using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_string(),
                source,
            }),
        }
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("DEXPROFILE_BIND") {
            self.bind = bind;
        }
        if let Some(url) = lookup("DEXPROFILE_STORE_URL") {
            self.store_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Some(path) = lookup("DEXPROFILE_STORE_CSV") {
            self.store_csv = path;
        }
        if let Some(url) = lookup("DEXPROFILE_REFERENCE_URL") {
            self.reference_url = url;
        }
        if let Some(language) = lookup("DEXPROFILE_LANGUAGE") {
            self.language = language;
        }
        if let Some(raw) = lookup("DEXPROFILE_DEADLINE_MS") {
            let ms = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: "DEXPROFILE_DEADLINE_MS",
                value: raw.clone(),
            })?;
            // 0 disables the deadline.
            self.deadline_ms = Some(ms).filter(|ms| *ms > 0);
        }
        if let Some(raw) = lookup("DEXPROFILE_EVOLUTION_MODE") {
            self.evolution_mode = EvolutionMode::parse(&raw).ok_or(ConfigError::Invalid {
                key: "DEXPROFILE_EVOLUTION_MODE",
                value: raw,
            })?;
        }
        Ok(())
    }

    pub fn assembler_settings(&self) -> AssemblerSettings {
        AssemblerSettings {
            language: self.language.clone(),
            sprite_template: self.sprite_template.clone(),
            evolution_mode: self.evolution_mode,
            deadline: self.deadline_ms.map(Duration::from_millis),
        }
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn build_store(&self) -> Result<Arc<dyn RecordStore>, StartupError> {
        match &self.store_url {
            Some(url) => {
                tracing::info!(%url, "using HTTP record store");
                Ok(Arc::new(HttpRecordStore::new(url, self.request_timeout())?))
            }
            None => {
                let store = CsvRecordStore::load(&self.store_csv)?;
                tracing::info!(
                    path = %self.store_csv,
                    records = store.len(),
                    "loaded CSV record store"
                );
                Ok(Arc::new(store))
            }
        }
    }

    pub fn build_reference(&self) -> Result<HttpReferenceClient, StartupError> {
        Ok(HttpReferenceClient::new(&self.reference_url, self.request_timeout())?)
    }

    pub fn build_assembler(&self) -> Result<DetailAssembler, StartupError> {
        let store = self.build_store()?;
        let reference = self.build_reference()?;
        Ok(DetailAssembler::new(
            store,
            Arc::new(reference),
            self.assembler_settings(),
        ))
    }
}
