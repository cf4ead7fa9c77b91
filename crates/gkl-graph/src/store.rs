//! Knowledge-graph store
//!
//! Keyed, idempotent upserts for every row the engine derives. The store
//! never deletes links except the targeted ConflictsWith invalidation the
//! conflict detector performs before re-detection, and never duplicates a
//! row for a key it has already seen.

use chrono::{DateTime, Utc};
use gkl_domain::{
    AuthorityTier, DocumentClassification, DocumentGovernanceProfile, DocumentId, EntityId,
    EntityKey, EntityType, FundId, KnowledgeAnchor, KnowledgeEntity, KnowledgeLink, LinkKey,
    LinkType, ObligationEvidenceMap,
};
use indexmap::IndexMap;

/// Whether an upsert created a new row or refreshed an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was created
    Created,
    /// An existing row was refreshed in place
    Updated,
}

impl UpsertOutcome {
    /// Whether this outcome created a row
    #[inline]
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, UpsertOutcome::Created)
    }
}

/// Idempotent row storage for the knowledge graph
///
/// Implementations guarantee the uniqueness invariants of the data model:
/// one classification and one profile per (fund, document), one entity
/// per (fund, type, canonical name), one link per (fund, source, target,
/// type), one evidence map per (fund, obligation entity).
pub trait GraphStore {
    /// Upsert a classification row, replacing the verdict on re-run
    fn upsert_classification(&mut self, row: DocumentClassification) -> UpsertOutcome;

    /// Upsert a governance profile row
    fn upsert_profile(&mut self, row: DocumentGovernanceProfile) -> UpsertOutcome;

    /// Replace a document's anchors wholesale (delete-then-insert)
    fn replace_anchors(
        &mut self,
        fund: FundId,
        document: DocumentId,
        anchors: Vec<KnowledgeAnchor>,
    );

    /// Upsert an entity by natural key; existing nodes are touched, never
    /// duplicated. Returns the node's id.
    fn upsert_entity(
        &mut self,
        fund: FundId,
        entity_type: EntityType,
        canonical_name: &str,
        now: DateTime<Utc>,
    ) -> (EntityId, UpsertOutcome);

    /// Upsert a link by natural key, refreshing confidence and snippet
    fn upsert_link(
        &mut self,
        key: LinkKey,
        authority_tier: AuthorityTier,
        confidence: f64,
        snippet: &str,
        now: DateTime<Utc>,
    ) -> UpsertOutcome;

    /// Delete all links of one type for a fund; returns how many
    fn invalidate_links(&mut self, fund: FundId, link_type: LinkType) -> usize;

    /// Upsert an evidence-map row
    fn upsert_evidence(&mut self, row: ObligationEvidenceMap) -> UpsertOutcome;
}

/// In-memory reference store with deterministic iteration order
#[derive(Debug, Default)]
pub struct InMemoryGraphStore {
    classifications: IndexMap<(FundId, DocumentId), DocumentClassification>,
    profiles: IndexMap<(FundId, DocumentId), DocumentGovernanceProfile>,
    anchors: IndexMap<(FundId, DocumentId), Vec<KnowledgeAnchor>>,
    entities: IndexMap<EntityKey, KnowledgeEntity>,
    links: IndexMap<LinkKey, KnowledgeLink>,
    evidence: IndexMap<(FundId, EntityId), ObligationEvidenceMap>,
}

impl InMemoryGraphStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classification for a document, if any
    #[must_use]
    pub fn classification(
        &self,
        fund: FundId,
        document: DocumentId,
    ) -> Option<&DocumentClassification> {
        self.classifications.get(&(fund, document))
    }

    /// Governance profile for a document, if any
    #[must_use]
    pub fn profile(
        &self,
        fund: FundId,
        document: DocumentId,
    ) -> Option<&DocumentGovernanceProfile> {
        self.profiles.get(&(fund, document))
    }

    /// Anchors for a document (empty slice if never extracted)
    #[must_use]
    pub fn anchors(&self, fund: FundId, document: DocumentId) -> &[KnowledgeAnchor] {
        self.anchors
            .get(&(fund, document))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Entity by natural key
    #[must_use]
    pub fn entity_by_key(&self, key: &EntityKey) -> Option<&KnowledgeEntity> {
        self.entities.get(key)
    }

    /// Entity by id
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&KnowledgeEntity> {
        self.entities.values().find(|e| e.id == id)
    }

    /// All entities, insertion order
    pub fn entities(&self) -> impl Iterator<Item = &KnowledgeEntity> {
        self.entities.values()
    }

    /// All links, insertion order
    pub fn links(&self) -> impl Iterator<Item = &KnowledgeLink> {
        self.links.values()
    }

    /// Links originating from one document
    pub fn links_from(&self, document: DocumentId) -> impl Iterator<Item = &KnowledgeLink> {
        self.links
            .values()
            .filter(move |l| l.source_document == document)
    }

    /// Link by natural key
    #[must_use]
    pub fn link(&self, key: &LinkKey) -> Option<&KnowledgeLink> {
        self.links.get(key)
    }

    /// All evidence maps, insertion order
    pub fn evidence_maps(&self) -> impl Iterator<Item = &ObligationEvidenceMap> {
        self.evidence.values()
    }

    /// Evidence map for one obligation entity
    #[must_use]
    pub fn evidence_for(&self, fund: FundId, entity: EntityId) -> Option<&ObligationEvidenceMap> {
        self.evidence.get(&(fund, entity))
    }

    /// Total link count
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

impl GraphStore for InMemoryGraphStore {
    fn upsert_classification(&mut self, row: DocumentClassification) -> UpsertOutcome {
        let key = (row.fund, row.document);
        match self.classifications.get_mut(&key) {
            Some(existing) => {
                existing.apply_patch(&row);
                UpsertOutcome::Updated
            }
            None => {
                self.classifications.insert(key, row);
                UpsertOutcome::Created
            }
        }
    }

    fn upsert_profile(&mut self, row: DocumentGovernanceProfile) -> UpsertOutcome {
        let key = (row.fund, row.document);
        match self.profiles.get_mut(&key) {
            Some(existing) => {
                existing.apply_patch(&row);
                UpsertOutcome::Updated
            }
            None => {
                self.profiles.insert(key, row);
                UpsertOutcome::Created
            }
        }
    }

    fn replace_anchors(
        &mut self,
        fund: FundId,
        document: DocumentId,
        anchors: Vec<KnowledgeAnchor>,
    ) {
        self.anchors.insert((fund, document), anchors);
    }

    fn upsert_entity(
        &mut self,
        fund: FundId,
        entity_type: EntityType,
        canonical_name: &str,
        now: DateTime<Utc>,
    ) -> (EntityId, UpsertOutcome) {
        let key = EntityKey {
            fund,
            entity_type,
            canonical_name: canonical_name.to_string(),
        };
        match self.entities.get_mut(&key) {
            Some(existing) => {
                existing.touch(now);
                (existing.id, UpsertOutcome::Updated)
            }
            None => {
                let entity = KnowledgeEntity::new(fund, entity_type, canonical_name, now);
                let id = entity.id;
                self.entities.insert(key, entity);
                (id, UpsertOutcome::Created)
            }
        }
    }

    fn upsert_link(
        &mut self,
        key: LinkKey,
        authority_tier: AuthorityTier,
        confidence: f64,
        snippet: &str,
        now: DateTime<Utc>,
    ) -> UpsertOutcome {
        match self.links.get_mut(&key) {
            Some(existing) => {
                existing.apply_patch(confidence, snippet, now);
                UpsertOutcome::Updated
            }
            None => {
                self.links
                    .insert(key, KnowledgeLink::new(key, authority_tier, confidence, snippet, now));
                UpsertOutcome::Created
            }
        }
    }

    fn invalidate_links(&mut self, fund: FundId, link_type: LinkType) -> usize {
        let before = self.links.len();
        self.links
            .retain(|key, _| !(key.fund == fund && key.link_type == link_type));
        before - self.links.len()
    }

    fn upsert_evidence(&mut self, row: ObligationEvidenceMap) -> UpsertOutcome {
        let key = (row.fund, row.obligation_entity);
        match self.evidence.get_mut(&key) {
            Some(existing) => {
                existing.apply_patch(&row);
                UpsertOutcome::Updated
            }
            None => {
                self.evidence.insert(key, row);
                UpsertOutcome::Created
            }
        }
    }
}
