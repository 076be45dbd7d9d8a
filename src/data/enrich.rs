//! Backfills the `evolution_chain_id` column of a store CSV export from the reference
//! service's species resources.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::data::store::ColumnIndex;
use crate::error::StoreError;
use crate::reference::{ChainReference, ReferenceService};

pub const CHAIN_ID_COLUMN: &str = "evolution_chain_id";
pub const REFERENCE_ID_COLUMN: &str = "national_id";
pub const DEFAULT_ENRICH_PAUSE: Duration = Duration::from_millis(50);

/// Row counts from one enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichReport {
    pub rows: usize,
    /// Rows that already carried a chain id and were left alone.
    pub kept: usize,
    pub filled: usize,
    /// Rows without a usable reference id.
    pub skipped: usize,
    /// Rows whose species lookup failed or had no chain link.
    pub failed: usize,
}

pub struct ChainIdEnricher<'a> {
    reference: &'a dyn ReferenceService,
    pause: Duration,
}

impl<'a> ChainIdEnricher<'a> {
    pub fn new(reference: &'a dyn ReferenceService) -> Self {
        Self {
            reference,
            pause: Duration::ZERO,
        }
    }

    /// Wait this long after every species lookup.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub async fn enrich_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<EnrichReport, StoreError> {
        let raw = fs::read_to_string(input)?;
        let (enriched, report) = self.enrich(&raw).await?;
        fs::write(output, enriched)?;
        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            filled = report.filled,
            failed = report.failed,
            "chain ids written"
        );
        Ok(report)
    }

    /// Returns the rewritten CSV. The chain id column is appended when the export
    /// does not have one; rows that cannot be resolved keep an empty cell.
    pub async fn enrich(&self, raw_csv: &str) -> Result<(String, EnrichReport), StoreError> {
        let mut reader = csv::Reader::from_reader(raw_csv.as_bytes());
        let mut headers = reader.headers()?.clone();
        let columns = ColumnIndex::new(&headers);
        if columns.position(REFERENCE_ID_COLUMN).is_none() {
            return Err(StoreError::MissingColumn(REFERENCE_ID_COLUMN));
        }
        let chain_column = match columns.position(CHAIN_ID_COLUMN) {
            Some(position) => position,
            None => {
                headers.push_field(CHAIN_ID_COLUMN);
                headers.len() - 1
            }
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&headers)?;
        let mut report = EnrichReport::default();
        for row in reader.records() {
            let row = row?;
            report.rows += 1;
            let mut fields: Vec<String> = row.iter().map(str::to_string).collect();
            fields.resize(headers.len(), String::new());

            if columns.number(&row, CHAIN_ID_COLUMN).is_some() {
                report.kept += 1;
            } else if let Some(reference_id) = columns.number(&row, REFERENCE_ID_COLUMN) {
                match self.chain_id(reference_id).await {
                    Some(chain_id) => {
                        fields[chain_column] = chain_id.to_string();
                        report.filled += 1;
                    }
                    None => report.failed += 1,
                }
                if !self.pause.is_zero() {
                    tokio::time::sleep(self.pause).await;
                }
            } else {
                tracing::warn!(
                    line = row.position().map(|p| p.line()),
                    "row has no usable reference id"
                );
                report.skipped += 1;
            }
            writer.write_record(&fields)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| StoreError::Io(err.into_error()))?;
        let enriched = String::from_utf8(bytes)
            .map_err(|err| StoreError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))?;
        Ok((enriched, report))
    }

    async fn chain_id(&self, reference_id: u32) -> Option<u32> {
        match self.reference.fetch_species(&reference_id.to_string()).await {
            Ok(species) => {
                let chain_id = species.evolution_chain.as_ref().and_then(ChainReference::id);
                if chain_id.is_none() {
                    tracing::warn!(reference_id, "species has no evolution chain link");
                }
                chain_id
            }
            Err(err) => {
                tracing::warn!(reference_id, error = %err, "species lookup failed");
                None
            }
        }
    }
}
