//! Cross-container linking
//!
//! For one document: resolve its authority tier from container identity,
//! compute the allowed link-type set, scan every indexed entity's terms
//! against the searchable corpus, decide the link type, and upsert the
//! edge if the matrix permits it.

use crate::matrix;
use chrono::{DateTime, Utc};
use gkl_domain::{AuthorityTier, DocType, DocumentRegistryEntry, EntityId, EntityType, LinkKey, LinkType};
use gkl_graph::{EntityIndex, GraphStore, IndexedEntity};
use gkl_profile::{AuthorityResolver, DocumentCorpus};
use serde::{Deserialize, Serialize};

/// Confidence for an exact canonical-name match
const CONF_EXACT: f64 = 0.92;

/// Confidence for a partial / keyword match
const CONF_PARTIAL: f64 = 0.72;

/// Container tables for the linker
///
/// Container identity is authoritative for tier resolution: the static
/// map here wins over any denormalized tag on the registry row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkerConfig {
    /// Container name → authority tag
    pub container_authority: Vec<(String, String)>,
    /// The container holding executed service-provider contracts
    pub provider_contracts_container: String,
}

impl LinkerConfig {
    /// Production container map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Authority tag recorded for a container, empty if unmapped
    #[must_use]
    pub fn container_tag(&self, container: &str) -> &str {
        self.container_authority
            .iter()
            .find(|(name, _)| name == container)
            .map(|(_, tag)| tag.as_str())
            .unwrap_or("")
    }
}

impl Default for LinkerConfig {
    fn default() -> Self {
        fn pair(a: &str, b: &str) -> (String, String) {
            (a.to_string(), b.to_string())
        }
        Self {
            container_authority: vec![
                pair("fund-governance", "BINDING"),
                pair("regulatory-library", "BINDING"),
                pair("service-provider-contracts", "BINDING"),
                pair("compliance-policies", "POLICY"),
                pair("portfolio-evidence", "EVIDENCE"),
                pair("deal-pipeline", "INTELLIGENCE"),
                pair("investor-materials", "NARRATIVE"),
            ],
            provider_contracts_container: "service-provider-contracts".to_string(),
        }
    }
}

/// Outcome of linking one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// New link rows created
    pub links_created: usize,
    /// Distinct entities that received an upsert (created or refreshed)
    pub linked_entities: Vec<EntityId>,
}

/// Scans documents against the entity index and upserts knowledge links
#[derive(Debug, Clone, Default)]
pub struct CrossContainerLinker {
    config: LinkerConfig,
    resolver: AuthorityResolver,
}

impl CrossContainerLinker {
    /// Create a linker
    #[inline]
    #[must_use]
    pub fn new(config: LinkerConfig, resolver: AuthorityResolver) -> Self {
        Self { config, resolver }
    }

    /// Resolve a document's authority tier from container identity
    ///
    /// The static container map is authoritative over the registry's raw
    /// tag; an unmapped container resolves through the Evidence default.
    #[must_use]
    pub fn resolve_document_tier(&self, entry: &DocumentRegistryEntry) -> AuthorityTier {
        let tag = self.config.container_tag(&entry.container);
        let doc_type = entry.detected_doc_type.unwrap_or(DocType::Other);
        self.resolver.resolve_tier(tag, doc_type)
    }

    /// Link one document against the entity index
    pub fn link<S: GraphStore>(
        &self,
        entry: &DocumentRegistryEntry,
        corpus: &DocumentCorpus,
        index: &EntityIndex,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> LinkStats {
        let tier = self.resolve_document_tier(entry);
        let mut stats = LinkStats::default();

        for candidate in index.entries() {
            // First matching term wins, in index-provided order.
            let Some(term) = candidate.first_matching_term(|t| corpus.contains_term(t)) else {
                continue;
            };

            let link_type = self.decide_link_type(candidate.entity_type, tier, &entry.container);
            if !matrix::permits(tier, link_type) {
                // Independent safety net over the decision list above.
                tracing::debug!(
                    document = %entry.id,
                    entity = %candidate.id,
                    %tier,
                    %link_type,
                    "link discarded by permission matrix"
                );
                continue;
            }

            let confidence = if term == candidate.canonical_name {
                CONF_EXACT
            } else {
                CONF_PARTIAL
            };
            let snippet = Self::snippet(candidate, term);
            let key = LinkKey {
                fund: entry.fund,
                source_document: entry.id,
                target_entity: candidate.id,
                link_type,
            };
            let outcome = store.upsert_link(key, tier, confidence, &snippet, now);
            if outcome.is_created() {
                stats.links_created += 1;
            }
            if !stats.linked_entities.contains(&candidate.id) {
                stats.linked_entities.push(candidate.id);
            }
        }

        tracing::debug!(
            document = %entry.id,
            %tier,
            created = stats.links_created,
            "document linked"
        );
        stats
    }

    /// Link-type decision list: entity kind first, then authority context
    fn decide_link_type(
        &self,
        entity_type: EntityType,
        tier: AuthorityTier,
        container: &str,
    ) -> LinkType {
        match entity_type {
            EntityType::Manager => LinkType::RelatesToManager,
            EntityType::Deal => LinkType::RelatesToDeal,
            EntityType::Obligation if tier.is_obligation_grade() => {
                if container == self.config.provider_contracts_container {
                    LinkType::Requires
                } else {
                    LinkType::DerivesObligation
                }
            }
            _ => LinkType::References,
        }
    }

    fn snippet(candidate: &IndexedEntity, term: &str) -> String {
        format!(
            "matched term '{term}' against {} '{}'",
            match candidate.entity_type {
                EntityType::Manager => "manager",
                EntityType::Deal => "deal",
                EntityType::Obligation => "obligation",
                EntityType::Provider => "provider",
            },
            candidate.canonical_name
        )
    }

    /// The injected configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// The tier resolver in use
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &AuthorityResolver {
        &self.resolver
    }
}
