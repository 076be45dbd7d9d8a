//! Ability resolution: localized name and description for each ability reference.

use futures_util::future::join_all;
use serde::Serialize;

use crate::data::AbilityRef;
use crate::profile::fallback::{collapse_whitespace, first_present, localized, non_blank};
use crate::reference::model::AbilityRecord;
use crate::reference::ReferenceService;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityInfo {
    pub name: String,
    pub description: String,
    pub is_hidden: bool,
}

pub struct AbilityResolver<'a> {
    reference: &'a dyn ReferenceService,
    language: &'a str,
}

impl<'a> AbilityResolver<'a> {
    pub fn new(reference: &'a dyn ReferenceService, language: &'a str) -> Self {
        Self {
            reference,
            language,
        }
    }

    /// Resolves every ref concurrently and waits for all of them. Refs whose fetch
    /// fails are dropped; the result may be shorter than `refs`. Surviving entries
    /// keep the order of `refs`. Duplicates are resolved twice.
    pub async fn resolve_all(&self, refs: &[AbilityRef]) -> Vec<AbilityInfo> {
        let lookups = refs.iter().map(|ability| self.resolve_one(ability));
        join_all(lookups).await.into_iter().flatten().collect()
    }

    async fn resolve_one(&self, ability: &AbilityRef) -> Option<AbilityInfo> {
        match self.reference.fetch_ability(&ability.name).await {
            Ok(record) => Some(self.localize(&record, ability)),
            Err(err) => {
                tracing::warn!(ability = %ability.name, %err, "ability dropped");
                None
            }
        }
    }

    fn localize(&self, record: &AbilityRecord, ability: &AbilityRef) -> AbilityInfo {
        let language = self.language;
        let canonical = || non_blank(&record.name).or_else(|| non_blank(&ability.name));

        let localized_name = || {
            localized(&record.names, language).and_then(|entry| non_blank(&entry.name))
        };
        let flavor_text = || {
            localized(&record.flavor_text_entries, language)
                .and_then(|entry| non_blank(&collapse_whitespace(&entry.flavor_text)))
        };
        let short_effect = || {
            localized(&record.effect_entries, language)
                .and_then(|entry| non_blank(&collapse_whitespace(&entry.short_effect)))
        };
        let effect = || {
            localized(&record.effect_entries, language)
                .and_then(|entry| non_blank(&collapse_whitespace(&entry.effect)))
        };

        let name = first_present::<String>(&[&localized_name, &canonical]).unwrap_or_default();
        let description =
            first_present::<String>(&[&flavor_text, &short_effect, &effect, &canonical])
                .unwrap_or_default();

        AbilityInfo {
            name,
            description,
            is_hidden: ability.is_hidden,
        }
    }
}
