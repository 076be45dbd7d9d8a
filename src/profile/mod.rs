//! Detail-view assembly pipeline and its three resolvers.

pub mod abilities;
pub mod assembler;
pub mod damage;
pub mod evolution;
pub mod fallback;
pub mod fanout;

#[cfg(test)]
pub(crate) mod testing;

pub use abilities::{AbilityInfo, AbilityResolver};
pub use assembler::{AssemblerSettings, BaseStat, CreatureProfile, DetailAssembler, ExtendedStats};
pub use damage::{DamageProfile, TypeEffectivenessAggregator, TypeMultiplierMap};
pub use evolution::{
    EvolutionBranch, EvolutionChainResolver, EvolutionMode, EvolutionNode, Lineage,
    TransitionPhrases, DEFAULT_SPRITE_TEMPLATE,
};
pub use fanout::Deadline;
