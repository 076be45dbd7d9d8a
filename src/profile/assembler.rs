//! Detail-view assembly: base record first, then three independent branches (reference
//! stats + type matchups, abilities, evolution lineage) run concurrently and merge into
//! one [CreatureProfile].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::data::{BaseRecord, RecordStore};
use crate::error::ProfileError;
use crate::profile::abilities::{AbilityInfo, AbilityResolver};
use crate::profile::damage::{DamageProfile, TypeEffectivenessAggregator};
use crate::profile::evolution::{
    EvolutionChainResolver, EvolutionMode, Lineage, DEFAULT_SPRITE_TEMPLATE,
};
use crate::profile::fanout::{settled, Deadline};
use crate::reference::model::CreatureDetails;
use crate::reference::ReferenceService;

/// Reference-service metadata shown next to the local record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedStats {
    pub height_m: f64,
    pub weight_kg: f64,
    pub base_stats: Vec<BaseStat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseStat {
    pub name: String,
    pub value: u32,
}

impl From<CreatureDetails> for ExtendedStats {
    fn from(details: CreatureDetails) -> Self {
        Self {
            height_m: f64::from(details.height) / 10.0,
            weight_kg: f64::from(details.weight) / 10.0,
            base_stats: details
                .stats
                .into_iter()
                .map(|entry| BaseStat {
                    name: entry.stat.name,
                    value: entry.base_stat,
                })
                .collect(),
        }
    }
}

/// Assembled detail view. `None` sections were either not applicable to the record or
/// failed; an empty `Some` means the branch ran and found nothing.
#[derive(Debug, Clone, Serialize)]
pub struct CreatureProfile {
    pub record: BaseRecord,
    pub stats: Option<ExtendedStats>,
    pub damage: Option<DamageProfile>,
    pub abilities: Option<Vec<AbilityInfo>>,
    pub evolution: Option<Lineage>,
    pub assembled_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AssemblerSettings {
    /// Reference-service language code used for every localized lookup.
    pub language: String,
    pub sprite_template: String,
    pub evolution_mode: EvolutionMode,
    /// Budget for the fan-out. `None` waits for every branch.
    pub deadline: Option<Duration>,
}

impl Default for AssemblerSettings {
    fn default() -> Self {
        Self {
            language: "ko".to_string(),
            sprite_template: DEFAULT_SPRITE_TEMPLATE.to_string(),
            evolution_mode: EvolutionMode::FirstBranch,
            deadline: None,
        }
    }
}

#[derive(Clone)]
pub struct DetailAssembler {
    store: Arc<dyn RecordStore>,
    reference: Arc<dyn ReferenceService>,
    settings: Arc<AssemblerSettings>,
}

impl DetailAssembler {
    pub fn new(
        store: Arc<dyn RecordStore>,
        reference: Arc<dyn ReferenceService>,
        settings: AssemblerSettings,
    ) -> Self {
        Self {
            store,
            reference,
            settings: Arc::new(settings),
        }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Fails only when the base record cannot be loaded. Every other failure degrades
    /// the matching section to `None`.
    pub async fn assemble(&self, record_id: u32) -> Result<CreatureProfile, ProfileError> {
        let span = tracing::info_span!("assemble", record_id, request_id = %Uuid::new_v4());
        self.assemble_record(record_id).instrument(span).await
    }

    async fn assemble_record(&self, record_id: u32) -> Result<CreatureProfile, ProfileError> {
        let record = self.store.fetch_record(record_id).await.map_err(|err| {
            let err = ProfileError::from(err);
            if let ProfileError::Store(source) = &err {
                tracing::error!(%source, "base record unavailable");
            }
            err
        })?;

        let deadline = Deadline::after(self.settings.deadline);
        let (reference_section, abilities, evolution) = tokio::join!(
            deadline.settle("reference", self.reference_section(&record)),
            deadline.settle("abilities", self.abilities_section(&record)),
            deadline.settle("evolution", self.evolution_section(&record)),
        );
        let (stats, damage) = match reference_section {
            Some((stats, damage)) => (stats, Some(damage)),
            None => (None, None),
        };

        tracing::info!(
            stats = stats.is_some(),
            damage = damage.is_some(),
            abilities = abilities.as_ref().map(Vec::len),
            evolution = evolution.is_some(),
            "profile assembled"
        );
        Ok(CreatureProfile {
            record,
            stats,
            damage,
            abilities,
            evolution,
            assembled_at: Utc::now(),
        })
    }

    /// Stats need the reference id; the type merge only needs the record's own types
    /// and runs whether or not the stats fetch succeeded.
    async fn reference_section(
        &self,
        record: &BaseRecord,
    ) -> Option<(Option<ExtendedStats>, DamageProfile)> {
        let reference_id = record.reference_id?;
        let stats = settled("stats", self.reference.fetch_creature(reference_id).await)
            .map(ExtendedStats::from);
        let damage = TypeEffectivenessAggregator::new(self.reference.as_ref())
            .aggregate(&record.types)
            .await;
        Some((stats, damage))
    }

    async fn abilities_section(&self, record: &BaseRecord) -> Option<Vec<AbilityInfo>> {
        let refs = record.ability_refs()?;
        let resolver = AbilityResolver::new(self.reference.as_ref(), &self.settings.language);
        Some(resolver.resolve_all(refs).await)
    }

    async fn evolution_section(&self, record: &BaseRecord) -> Option<Lineage> {
        let chain_id = record.evolution_chain_id?;
        let chain = settled(
            "evolution",
            self.reference.fetch_evolution_chain(chain_id).await,
        )?;
        let resolver = EvolutionChainResolver::new(self.reference.as_ref(), &self.settings.language)
            .with_sprite_template(&self.settings.sprite_template);
        Some(resolver.resolve(&chain.chain, self.settings.evolution_mode).await)
    }
}
