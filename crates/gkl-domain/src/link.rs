//! Knowledge links
//!
//! Typed, authority-gated directed edges from a source document to a
//! target entity. Uniqueness is (fund, source_document, target_entity,
//! link_type); re-running the linker refreshes confidence and snippet in
//! place, while the authority tier recorded at creation time stays put.

use crate::authority::AuthorityTier;
use crate::ids::{DocumentId, EntityId, FundId, LinkId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Semantic relation a document may assert about an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    /// Plain mention: the weakest, always-permitted relation
    References,
    /// The document gives rise to the obligation
    DerivesObligation,
    /// The document evidences satisfaction of the obligation
    Satisfies,
    /// The document's obligation conflicts with another binding rule
    ConflictsWith,
    /// The document contractually requires the obligation of a provider
    Requires,
    /// The document concerns the manager
    RelatesToManager,
    /// The document concerns the deal
    RelatesToDeal,
}

impl LinkType {
    /// Lowercase label for snippets and logging
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            LinkType::References => "references",
            LinkType::DerivesObligation => "derives_obligation",
            LinkType::Satisfies => "satisfies",
            LinkType::ConflictsWith => "conflicts_with",
            LinkType::Requires => "requires",
            LinkType::RelatesToManager => "relates_to_manager",
            LinkType::RelatesToDeal => "relates_to_deal",
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Natural uniqueness key of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkKey {
    /// Owning fund scope
    pub fund: FundId,
    /// Source document
    pub source_document: DocumentId,
    /// Target entity
    pub target_entity: EntityId,
    /// Relation type
    pub link_type: LinkType,
}

/// Directed edge from a document to a knowledge entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeLink {
    /// Edge identifier
    pub id: LinkId,
    /// Owning fund scope
    pub fund: FundId,
    /// Source document
    pub source_document: DocumentId,
    /// Target entity
    pub target_entity: EntityId,
    /// Relation type
    pub link_type: LinkType,
    /// Resolved tier of the source document at link-creation time
    pub authority_tier: AuthorityTier,
    /// Match confidence, 0.0–1.0
    pub confidence: f64,
    /// Evidence snippet describing the match
    pub snippet: String,
    /// First-created timestamp (creation-only)
    pub created_at: DateTime<Utc>,
    /// Last refresh timestamp
    pub updated_at: DateTime<Utc>,
}

impl KnowledgeLink {
    /// Create an edge at `now`
    #[must_use]
    pub fn new(
        key: LinkKey,
        authority_tier: AuthorityTier,
        confidence: f64,
        snippet: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LinkId::new(),
            fund: key.fund,
            source_document: key.source_document,
            target_entity: key.target_entity,
            link_type: key.link_type,
            authority_tier,
            confidence,
            snippet: snippet.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Natural uniqueness key
    #[inline]
    #[must_use]
    pub fn key(&self) -> LinkKey {
        LinkKey {
            fund: self.fund,
            source_document: self.source_document,
            target_entity: self.target_entity,
            link_type: self.link_type,
        }
    }

    /// Refresh mutable fields from a re-link
    ///
    /// Creation-only fields (id, key fields, creation-time authority
    /// tier, created_at) never change.
    pub fn apply_patch(&mut self, confidence: f64, snippet: &str, now: DateTime<Utc>) {
        self.confidence = confidence;
        self.snippet = snippet.to_string();
        self.updated_at = now;
    }
}
