//! Knowledge entities
//!
//! Canonical, deduplicated nodes in the per-fund knowledge graph.
//! Uniqueness is (fund, entity_type, canonical_name): re-encountering the
//! same canonical name touches audit metadata but never creates a second
//! node.

use crate::ids::{EntityId, FundId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of canonical node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// Investment manager
    Manager,
    /// Deal / portfolio investment
    Deal,
    /// Registered obligation
    Obligation,
    /// Contracted service provider
    Provider,
}

/// Natural uniqueness key of an entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    /// Owning fund scope
    pub fund: FundId,
    /// Node kind
    pub entity_type: EntityType,
    /// Canonical name, already normalized by the index builder
    pub canonical_name: String,
}

/// Canonical node in the knowledge graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntity {
    /// Node identifier
    pub id: EntityId,
    /// Owning fund scope
    pub fund: FundId,
    /// Node kind
    pub entity_type: EntityType,
    /// Canonical name
    pub canonical_name: String,
    /// First-seen timestamp (creation-only)
    pub created_at: DateTime<Utc>,
    /// Last time an index build re-encountered this node
    pub touched_at: DateTime<Utc>,
}

impl KnowledgeEntity {
    /// Create a node at `now`
    #[must_use]
    pub fn new(
        fund: FundId,
        entity_type: EntityType,
        canonical_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntityId::new(),
            fund,
            entity_type,
            canonical_name: canonical_name.into(),
            created_at: now,
            touched_at: now,
        }
    }

    /// Natural uniqueness key
    #[must_use]
    pub fn key(&self) -> EntityKey {
        EntityKey {
            fund: self.fund,
            entity_type: self.entity_type,
            canonical_name: self.canonical_name.clone(),
        }
    }

    /// Update audit metadata on re-encounter; identity fields stay put
    #[inline]
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.touched_at = now;
    }
}
