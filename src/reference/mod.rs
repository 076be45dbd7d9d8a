//! Third-party reference data service: wire model and client.

pub mod client;
pub mod model;

pub use client::{HttpReferenceClient, ReferenceService, DEFAULT_REFERENCE_URL};
pub use model::{
    AbilityRecord, ChainLink, ChainReference, CreatureDetails, DamageRelations, EffectEntry,
    EvolutionChainRecord, EvolutionDetail, FlavorTextEntry, LocalizedName, NamedResource,
    SpeciesRecord, StatEntry, TypeRecord,
};
