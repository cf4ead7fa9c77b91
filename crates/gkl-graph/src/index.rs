//! Entity index construction
//!
//! One build per pipeline run: reads the canonical feeds (managers,
//! deals, obligations, provider documents), upserts the deduplicated
//! entity nodes through the store, and produces the in-memory index the
//! linker scans. Source order and per-entity term order are preserved:
//! the linker's first-match-wins contract depends on it.

use crate::store::GraphStore;
use chrono::{DateTime, Utc};
use gkl_domain::text::{normalize, significant_words, strip_extension};
use gkl_domain::{EntityId, EntityType, FundSnapshot};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Significant-word cap for obligation term sets
const OBLIGATION_TERM_WORDS: usize = 10;

/// Container tables for the index builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Container whose documents become Provider entities
    pub provider_container: String,
}

impl IndexConfig {
    /// Production container table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            provider_container: "service-provider-contracts".to_string(),
        }
    }
}

/// One indexed entity: the stored node plus its matchable terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEntity {
    /// Stored node id
    pub id: EntityId,
    /// Node kind
    pub entity_type: EntityType,
    /// Canonical (normalized) name
    pub canonical_name: String,
    /// Matchable terms, in match-priority order
    pub terms: Vec<String>,
}

impl IndexedEntity {
    /// First term matching the corpus, if any
    #[must_use]
    pub fn first_matching_term<'a>(
        &'a self,
        contains: impl Fn(&str) -> bool,
    ) -> Option<&'a str> {
        self.terms
            .iter()
            .map(String::as_str)
            .find(|term| contains(term))
    }
}

/// The per-run entity index
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    entries: Vec<IndexedEntity>,
}

impl EntityIndex {
    /// All entries, source order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[IndexedEntity] {
        &self.entries
    }

    /// Number of indexed entities
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entities (the run-blocking condition)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Obligation entries only
    pub fn obligations(&self) -> impl Iterator<Item = &IndexedEntity> {
        self.entries
            .iter()
            .filter(|e| e.entity_type == EntityType::Obligation)
    }

    /// Obligation entry for a normalized obligation id
    #[must_use]
    pub fn obligation_by_canonical(&self, canonical_name: &str) -> Option<&IndexedEntity> {
        self.obligations()
            .find(|e| e.canonical_name == canonical_name)
    }
}

/// Builds the entity index from the snapshot feeds
#[derive(Debug, Clone, Default)]
pub struct EntityIndexBuilder {
    config: IndexConfig,
}

impl EntityIndexBuilder {
    /// Create a builder
    #[inline]
    #[must_use]
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    /// Build the index for one run
    ///
    /// Managers and obligations are as_of-filtered; deals and provider
    /// documents are always current. Rows whose canonical name normalizes
    /// to nothing are skipped as unindexable.
    pub fn build<S: GraphStore>(
        &self,
        snapshot: &FundSnapshot,
        as_of: DateTime<Utc>,
        store: &mut S,
    ) -> EntityIndex {
        let fund = snapshot.fund;
        let mut entries: Vec<IndexedEntity> = Vec::new();

        for manager in snapshot.managers.iter().filter(|m| m.recorded_at <= as_of) {
            let canonical = normalize(&manager.name);
            if canonical.is_empty() {
                continue;
            }
            let terms = vec![canonical.clone()];
            Self::push(&mut entries, store, fund, EntityType::Manager, canonical, terms, as_of);
        }

        for deal in &snapshot.deals {
            let canonical = normalize(&deal.name);
            if canonical.is_empty() {
                continue;
            }
            let mut terms: IndexSet<String> = IndexSet::new();
            terms.insert(canonical.clone());
            if let Some(sponsor) = &deal.sponsor {
                let sponsor = normalize(sponsor);
                if !sponsor.is_empty() {
                    terms.insert(sponsor);
                }
            }
            Self::push(
                &mut entries,
                store,
                fund,
                EntityType::Deal,
                canonical,
                terms.into_iter().collect(),
                as_of,
            );
        }

        for obligation in snapshot
            .obligations
            .iter()
            .filter(|o| o.recorded_at <= as_of)
        {
            let canonical = normalize(&obligation.obligation_id);
            if canonical.is_empty() {
                continue;
            }
            let mut terms: IndexSet<String> = IndexSet::new();
            terms.insert(canonical.clone());
            for word in significant_words(&obligation.obligation_text, OBLIGATION_TERM_WORDS) {
                terms.insert(word);
            }
            Self::push(
                &mut entries,
                store,
                fund,
                EntityType::Obligation,
                canonical,
                terms.into_iter().collect(),
                as_of,
            );
        }

        for document in snapshot
            .active_documents()
            .filter(|d| d.container == self.config.provider_container)
        {
            let canonical = normalize(strip_extension(&document.title));
            if canonical.is_empty() {
                continue;
            }
            let terms = vec![canonical.clone()];
            Self::push(&mut entries, store, fund, EntityType::Provider, canonical, terms, as_of);
        }

        tracing::debug!(entities = entries.len(), "entity index built");
        EntityIndex { entries }
    }

    fn push<S: GraphStore>(
        entries: &mut Vec<IndexedEntity>,
        store: &mut S,
        fund: gkl_domain::FundId,
        entity_type: EntityType,
        canonical_name: String,
        terms: Vec<String>,
        now: DateTime<Utc>,
    ) {
        // Re-encountering a canonical name within one build refreshes the
        // stored node but must not add a second index entry.
        if entries
            .iter()
            .any(|e| e.entity_type == entity_type && e.canonical_name == canonical_name)
        {
            store.upsert_entity(fund, entity_type, &canonical_name, now);
            return;
        }
        let (id, _) = store.upsert_entity(fund, entity_type, &canonical_name, now);
        entries.push(IndexedEntity {
            id,
            entity_type,
            canonical_name,
            terms,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryGraphStore;
    use gkl_domain::{DealRecord, DocumentRegistryEntry, FundId, ManagerProfile, ObligationRegisterEntry};
    use pretty_assertions::assert_eq;

    fn build(snapshot: &FundSnapshot) -> (EntityIndex, InMemoryGraphStore) {
        let mut store = InMemoryGraphStore::new();
        let index = EntityIndexBuilder::default().build(snapshot, Utc::now(), &mut store);
        (index, store)
    }

    #[test]
    fn manager_and_deal_terms() {
        let fund = FundId::new();
        let snapshot = FundSnapshot::new(fund)
            .with_manager(ManagerProfile::new(fund, "Meridian Capital", Utc::now()))
            .with_deal(DealRecord::new(fund, "Project Aurora", Utc::now()).with_sponsor("Northgate Partners"));
        let (index, store) = build(&snapshot);

        assert_eq!(index.len(), 2);
        let manager = &index.entries()[0];
        assert_eq!(manager.entity_type, EntityType::Manager);
        assert_eq!(manager.terms, vec!["meridian capital"]);

        let deal = &index.entries()[1];
        assert_eq!(deal.canonical_name, "project aurora");
        assert_eq!(deal.terms, vec!["project aurora", "northgate partners"]);

        assert_eq!(store.entities().count(), 2);
    }

    #[test]
    fn obligation_terms_id_plus_significant_words() {
        let fund = FundId::new();
        let snapshot = FundSnapshot::new(fund).with_obligation(ObligationRegisterEntry::new(
            fund,
            "OBL-2025-014",
            "The fund must file audited financial statements with the regulator",
            Utc::now(),
        ));
        let (index, _) = build(&snapshot);

        let obligation = &index.entries()[0];
        assert_eq!(obligation.canonical_name, "obl 2025 014");
        assert_eq!(obligation.terms[0], "obl 2025 014");
        assert!(obligation.terms.contains(&"audited".to_string()));
        assert!(obligation.terms.contains(&"statements".to_string()));
        // "the" and "must"? "must" is 4 chars and significant; "the" is not
        assert!(!obligation.terms.contains(&"the".to_string()));
    }

    #[test]
    fn as_of_filters_managers_and_obligations() {
        let fund = FundId::new();
        let now = Utc::now();
        let future = now + chrono::Duration::days(7);
        let snapshot = FundSnapshot::new(fund)
            .with_manager(ManagerProfile::new(fund, "Future Manager", future))
            .with_obligation(ObligationRegisterEntry::new(fund, "OBL-9", "future filing duty", future))
            .with_deal(DealRecord::new(fund, "Current Deal", future));
        let mut store = InMemoryGraphStore::new();
        let index = EntityIndexBuilder::default().build(&snapshot, now, &mut store);

        // Deals are not as_of-filtered; managers and obligations are.
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].entity_type, EntityType::Deal);
    }

    #[test]
    fn provider_documents_use_stripped_title() {
        let fund = FundId::new();
        let snapshot = FundSnapshot::new(fund)
            .with_document(DocumentRegistryEntry::new(
                fund,
                "service-provider-contracts",
                "contracts/admin.pdf",
                "Administration Agreement.pdf",
            ))
            .with_document(DocumentRegistryEntry::new(
                fund,
                "fund-governance",
                "gov/lpa.pdf",
                "LPA.pdf",
            ));
        let (index, _) = build(&snapshot);

        assert_eq!(index.len(), 1);
        let provider = &index.entries()[0];
        assert_eq!(provider.entity_type, EntityType::Provider);
        assert_eq!(provider.canonical_name, "administration agreement");
    }

    #[test]
    fn rebuild_touches_instead_of_duplicating() {
        let fund = FundId::new();
        let snapshot = FundSnapshot::new(fund)
            .with_manager(ManagerProfile::new(fund, "Meridian Capital", Utc::now()));
        let mut store = InMemoryGraphStore::new();
        let builder = EntityIndexBuilder::default();

        let first = builder.build(&snapshot, Utc::now(), &mut store);
        let second = builder.build(&snapshot, Utc::now(), &mut store);

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(store.entities().count(), 1);
        assert_eq!(first.entries()[0].id, second.entries()[0].id);
    }

    #[test]
    fn empty_snapshot_builds_empty_index() {
        let snapshot = FundSnapshot::new(FundId::new());
        let (index, _) = build(&snapshot);
        assert!(index.is_empty());
    }

    #[test]
    fn first_matching_term_honors_order() {
        let entity = IndexedEntity {
            id: EntityId::new(),
            entity_type: EntityType::Deal,
            canonical_name: "project aurora".to_string(),
            terms: vec!["project aurora".to_string(), "northgate".to_string()],
        };
        let matched = entity.first_matching_term(|t| t == "northgate" || t == "project aurora");
        assert_eq!(matched, Some("project aurora"));
    }
}
