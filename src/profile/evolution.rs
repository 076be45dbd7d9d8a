//! Evolution chain resolution.
//!
//! The reference service encodes a lineage as a tree: every node is a species plus the
//! edges leaving it. The detail view shows a single line, so by default only the first
//! listed child is followed at each node and alternative branches are dropped.
//! [EvolutionMode::FullTree] keeps every branch instead.

use futures_util::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};

use crate::profile::fallback::{first_present, localized, non_blank};
use crate::reference::model::{ChainLink, EvolutionDetail};
use crate::reference::ReferenceService;

pub const DEFAULT_SPRITE_TEMPLATE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png";

const DEFAULT_TRIGGER: &str = "level-up";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionMode {
    /// Follow the first child edge only (the detail view's current behavior).
    #[default]
    FirstBranch,
    /// Keep every branch; presentation picks what to show.
    FullTree,
}

impl EvolutionMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "first_branch" | "first" | "path" => Some(Self::FirstBranch),
            "full_tree" | "tree" => Some(Self::FullTree),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionNode {
    pub species_id: String,
    pub name: String,
    pub image_url: String,
    /// Conditions of the edge leading into this stage. Empty for the root.
    pub transition: String,
}

/// One node of the full lineage tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionBranch {
    #[serde(flatten)]
    pub node: EvolutionNode,
    pub children: Vec<EvolutionBranch>,
}

impl EvolutionBranch {
    /// Root-first path through the first child at every node.
    pub fn first_path(&self) -> Vec<EvolutionNode> {
        let mut path = vec![self.node.clone()];
        let mut current = self;
        while let Some(next) = current.children.first() {
            path.push(next.node.clone());
            current = next;
        }
        path
    }

    /// Number of stages on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }
}

/// Resolved lineage, shaped by the [EvolutionMode] it was built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "stages", rename_all = "snake_case")]
pub enum Lineage {
    Path(Vec<EvolutionNode>),
    Tree(EvolutionBranch),
}

impl Lineage {
    /// The linear display sequence, whichever mode produced this lineage.
    pub fn path(&self) -> Vec<EvolutionNode> {
        match self {
            Lineage::Path(nodes) => nodes.clone(),
            Lineage::Tree(root) => root.first_path(),
        }
    }
}

/// Phrase templates for transition summaries; `{}` is replaced by the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPhrases {
    pub min_level: &'static str,
    pub item: &'static str,
}

impl TransitionPhrases {
    pub fn for_language(language: &str) -> Self {
        match language {
            "ko" => Self {
                min_level: "레벨 {}",
                item: "{} 사용",
            },
            _ => Self {
                min_level: "Lv. {}",
                item: "use {}",
            },
        }
    }

    /// Minimum level, then required item, then the trigger kind unless it is a plain
    /// level-up. Empty when none apply.
    pub fn summarize(&self, detail: &EvolutionDetail) -> String {
        let mut parts = Vec::new();
        if let Some(level) = detail.min_level {
            parts.push(self.min_level.replace("{}", &level.to_string()));
        }
        if let Some(item) = &detail.item {
            parts.push(self.item.replace("{}", &item.name));
        }
        if let Some(trigger) = &detail.trigger {
            if trigger.name != DEFAULT_TRIGGER && !trigger.name.is_empty() {
                parts.push(trigger.name.clone());
            }
        }
        parts.join(" ")
    }
}

pub struct EvolutionChainResolver<'a> {
    reference: &'a dyn ReferenceService,
    language: &'a str,
    sprite_template: &'a str,
    phrases: TransitionPhrases,
}

impl<'a> EvolutionChainResolver<'a> {
    pub fn new(reference: &'a dyn ReferenceService, language: &'a str) -> Self {
        Self {
            reference,
            language,
            sprite_template: DEFAULT_SPRITE_TEMPLATE,
            phrases: TransitionPhrases::for_language(language),
        }
    }

    pub fn with_sprite_template(mut self, template: &'a str) -> Self {
        self.sprite_template = template;
        self
    }

    pub async fn resolve(&self, root: &ChainLink, mode: EvolutionMode) -> Lineage {
        match mode {
            EvolutionMode::FirstBranch => Lineage::Path(self.resolve_path(root).await),
            EvolutionMode::FullTree => Lineage::Tree(self.resolve_tree(root).await),
        }
    }

    /// Root-first sequence following the first child edge until a leaf. Never empty.
    pub async fn resolve_path(&self, root: &ChainLink) -> Vec<EvolutionNode> {
        let mut stages = Vec::new();
        let mut current = Some(root);
        while let Some(link) = current {
            let is_root = stages.is_empty();
            stages.push(self.resolve_node(link, is_root).await);
            if link.evolves_to.len() > 1 {
                tracing::debug!(
                    species = %link.species.name,
                    dropped = link.evolves_to.len() - 1,
                    "following first evolution branch only"
                );
            }
            current = link.evolves_to.first();
        }
        stages
    }

    /// Depth-first over every branch, one name lookup at a time.
    pub async fn resolve_tree(&self, root: &ChainLink) -> EvolutionBranch {
        self.resolve_branch(root, true).await
    }

    fn resolve_branch<'s>(
        &'s self,
        link: &'s ChainLink,
        is_root: bool,
    ) -> BoxFuture<'s, EvolutionBranch> {
        async move {
            let node = self.resolve_node(link, is_root).await;
            let mut children = Vec::with_capacity(link.evolves_to.len());
            for child in &link.evolves_to {
                children.push(self.resolve_branch(child, false).await);
            }
            EvolutionBranch { node, children }
        }
        .boxed()
    }

    async fn resolve_node(&self, link: &ChainLink, is_root: bool) -> EvolutionNode {
        let species_id = link.species.id().to_string();
        let name = self.species_name(link, &species_id).await;
        let transition = if is_root {
            String::new()
        } else {
            link.evolution_details
                .first()
                .map(|detail| self.phrases.summarize(detail))
                .unwrap_or_default()
        };
        EvolutionNode {
            image_url: self.sprite_template.replace("{id}", &species_id),
            species_id,
            name,
            transition,
        }
    }

    /// Localized species name; the canonical name when the lookup fails or has no
    /// entry for the language.
    async fn species_name(&self, link: &ChainLink, species_id: &str) -> String {
        let species = match self.reference.fetch_species(species_id).await {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(species = %link.species.name, %err, "species name unavailable");
                None
            }
        };
        let localized_name = || {
            species
                .as_ref()
                .and_then(|record| localized(&record.names, self.language))
                .and_then(|entry| non_blank(&entry.name))
        };
        let canonical = || Some(link.species.name.clone());
        first_present::<String>(&[&localized_name, &canonical]).unwrap_or_default()
    }
}
