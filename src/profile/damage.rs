//! Type effectiveness: merges the damage relations of a creature's own types into one
//! classified weakness/resistance profile.
//!
//! Multipliers compound across own types (x2 and x2 is x4, x2 and x0.5 is neutral).
//! Only the four discrete outcomes the detail view shows are classified; x1, x0.25 and
//! anything else are left out.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::data::TypeNames;
use crate::reference::model::DamageRelations;
use crate::reference::ReferenceService;

/// Attacking type -> combined multiplier. Unseen types are implicitly x1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMultiplierMap {
    multipliers: BTreeMap<String, f64>,
}

impl TypeMultiplierMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&mut self, attacking_type: &str, factor: f64) {
        *self
            .multipliers
            .entry(attacking_type.to_string())
            .or_insert(1.0) *= factor;
    }

    /// Fold one defending type's relations into the running multipliers.
    pub fn apply(&mut self, relations: &DamageRelations) {
        for attacker in &relations.double_damage_from {
            self.scale(&attacker.name, 2.0);
        }
        for attacker in &relations.half_damage_from {
            self.scale(&attacker.name, 0.5);
        }
        for attacker in &relations.no_damage_from {
            self.scale(&attacker.name, 0.0);
        }
    }

    pub fn get(&self, attacking_type: &str) -> f64 {
        self.multipliers.get(attacking_type).copied().unwrap_or(1.0)
    }

    pub fn classify(&self) -> DamageProfile {
        let mut profile = DamageProfile::default();
        for (attacking_type, multiplier) in &self.multipliers {
            // Products of 2, 0.5 and 0 are exact in binary floating point.
            let bucket = if *multiplier == 4.0 {
                &mut profile.quadruple
            } else if *multiplier == 2.0 {
                &mut profile.double
            } else if *multiplier == 0.5 {
                &mut profile.half
            } else if *multiplier == 0.0 {
                &mut profile.no
            } else {
                continue;
            };
            bucket.insert(attacking_type.clone());
        }
        profile
    }
}

/// Damage received, grouped by multiplier. The four sets are pairwise disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DamageProfile {
    #[serde(rename = "quadruple_damage_from")]
    pub quadruple: BTreeSet<String>,
    #[serde(rename = "double_damage_from")]
    pub double: BTreeSet<String>,
    #[serde(rename = "half_damage_from")]
    pub half: BTreeSet<String>,
    #[serde(rename = "no_damage_from")]
    pub no: BTreeSet<String>,
}

impl DamageProfile {
    pub fn is_empty(&self) -> bool {
        self.quadruple.is_empty()
            && self.double.is_empty()
            && self.half.is_empty()
            && self.no.is_empty()
    }

    /// Same profile with reference type names replaced by local display names.
    /// Names missing from the table are kept as-is.
    pub fn localized(&self, names: &TypeNames) -> DamageProfile {
        let map = |set: &BTreeSet<String>| {
            set.iter()
                .map(|t| names.to_local(t).map(str::to_string).unwrap_or_else(|| t.clone()))
                .collect()
        };
        DamageProfile {
            quadruple: map(&self.quadruple),
            double: map(&self.double),
            half: map(&self.half),
            no: map(&self.no),
        }
    }
}

/// Merges own-type relations fetched from the reference service.
pub struct TypeEffectivenessAggregator<'a> {
    reference: &'a dyn ReferenceService,
    names: TypeNames,
}

impl<'a> TypeEffectivenessAggregator<'a> {
    pub fn new(reference: &'a dyn ReferenceService) -> Self {
        Self {
            reference,
            names: TypeNames,
        }
    }

    /// Fetches each own type's relations in order, one at a time. A type that cannot
    /// be mapped or fetched is logged and left out of the merge; this never fails.
    pub async fn aggregate(&self, own_types: &[String]) -> DamageProfile {
        let mut multipliers = TypeMultiplierMap::new();
        for own_type in own_types {
            let reference_name = match self.names.to_reference(own_type) {
                Ok(name) => name,
                Err(err) => {
                    tracing::warn!(%err, "skipping own type");
                    continue;
                }
            };
            match self.reference.fetch_type(reference_name).await {
                Ok(record) => multipliers.apply(&record.damage_relations),
                Err(err) => {
                    tracing::warn!(
                        own_type = %own_type,
                        %err,
                        "damage relations unavailable; type skipped"
                    );
                }
            }
        }
        multipliers.classify()
    }
}
