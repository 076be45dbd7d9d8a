//! Local record store adapters. The store itself is an external collaborator; the
//! assembler only sees the [RecordStore] trait.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::data::record::{split_type_list, AbilityRef, BaseRecord};
use crate::error::StoreError;

pub const DEFAULT_RECORDS_CSV_PATH: &str = "data/creatures.csv";

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one base record. A missing id is [StoreError::NotFound].
    async fn fetch_record(&self, id: u32) -> Result<BaseRecord, StoreError>;
}

/// Store reached over HTTP: `GET {base_url}/creature/{id}`.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpRecordStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, http_client))
    }

    pub fn with_client(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn fetch_record(&self, id: u32) -> Result<BaseRecord, StoreError> {
        let url = format!("{}/creature/{}", self.base_url, id);
        let response = self.http_client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(id)),
            status if !status.is_success() => Err(StoreError::Status {
                url,
                status: status.as_u16(),
            }),
            _ => {
                let body = response.bytes().await?;
                Ok(serde_json::from_slice(&body)?)
            }
        }
    }
}

/// Store backed by a CSV export, loaded fully into memory.
#[derive(Debug, Clone, Default)]
pub struct CsvRecordStore {
    records: HashMap<u32, BaseRecord>,
}

impl CsvRecordStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path)?;
        Self::from_csv_str(&raw)
    }

    pub fn from_csv_str(raw: &str) -> Result<Self, StoreError> {
        let mut reader = csv::Reader::from_reader(raw.as_bytes());
        let columns = ColumnIndex::new(reader.headers()?);
        let mut records = HashMap::new();
        for row in reader.records() {
            let row = row?;
            match columns.to_record(&row) {
                Some(record) => {
                    records.insert(record.id, record);
                }
                None => tracing::warn!(
                    line = row.position().map(|p| p.line()),
                    "skipping CSV row without id or name"
                ),
            }
        }
        Ok(Self { records })
    }

    pub fn from_records(records: impl IntoIterator<Item = BaseRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordStore for CsvRecordStore {
    async fn fetch_record(&self, id: u32) -> Result<BaseRecord, StoreError> {
        self.records.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }
}

/// Header name -> column position for the store's CSV export.
pub(crate) struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub(crate) fn new(headers: &csv::StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().trim_start_matches('\u{feff}').to_string(), i))
            .collect();
        Self { positions }
    }

    pub(crate) fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    fn text(&self, row: &csv::StringRecord, column: &str) -> Option<String> {
        let value = row.get(*self.positions.get(column)?)?.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    pub(crate) fn number(&self, row: &csv::StringRecord, column: &str) -> Option<u32> {
        parse_whole_number(&self.text(row, column)?)
    }

    fn to_record(&self, row: &csv::StringRecord) -> Option<BaseRecord> {
        let id = self.number(row, "id")?;
        let name = self.text(row, "name_ko").or_else(|| self.text(row, "name"))?;
        Some(BaseRecord {
            id,
            dex_number: self.number(row, "pokemon_id"),
            name,
            canonical_name: self.text(row, "name_en"),
            types: self
                .text(row, "type")
                .map(|raw| split_type_list(&raw))
                .unwrap_or_default(),
            description: self.text(row, "description"),
            image_url: self.text(row, "image_url"),
            reference_id: self.number(row, "national_id"),
            evolution_chain_id: self.number(row, "evolution_chain_id"),
            abilities: self.text(row, "abilities").map(|raw| parse_ability_column(&raw)),
            role: self.text(row, "role"),
            feature: self.text(row, "feature"),
            appearance: self.text(row, "appearance"),
        })
    }
}

/// pandas writes integer columns that hold NaN as floats ("12.0"). Only whole values
/// inside the u32 range are accepted.
fn parse_whole_number(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v as u32)
    })
}

/// `overgrow;*chlorophyll` -> two refs, the second hidden.
fn parse_ability_column(raw: &str) -> Vec<AbilityRef> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.strip_prefix('*') {
            Some(name) => AbilityRef::new(name.trim(), true),
            None => AbilityRef::new(entry, false),
        })
        .collect()
}
