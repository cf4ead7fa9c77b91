//! Document registry rows
//!
//! A registry entry is a physical document observed in a storage
//! container. The scanning collaborator owns these rows; this engine only
//! ever writes back the detected document type.

use crate::checksum::ContentChecksum;
use crate::doc_type::DocType;
use crate::ids::{DocumentId, FundId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who a document may be shown to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shareability {
    /// Internal to the fund's operating team
    Internal,
    /// Shareable with investors
    InvestorFacing,
    /// Publicly distributable
    Public,
}

/// Lifecycle stage of a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleStage {
    /// Current version, in scope for linking
    Active,
    /// Replaced by a newer version
    Superseded,
    /// Retained for audit only
    Archived,
}

/// A physical document observed in a container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRegistryEntry {
    /// Owning fund scope
    pub fund: FundId,
    /// Document identifier
    pub id: DocumentId,
    /// Container name (authoritative for tier resolution)
    pub container: String,
    /// Blob path within the container
    pub blob_path: String,
    /// Document title as observed
    pub title: String,
    /// Raw container-level authority tag (denormalized, advisory only)
    pub authority_tag: String,
    /// Optional business-domain tag from the scanner
    pub domain_tag: Option<String>,
    /// Shareability as recorded by the scanner
    pub shareability: Shareability,
    /// Lifecycle stage
    pub lifecycle: LifecycleStage,
    /// Content checksum of the observed blob version
    pub checksum: ContentChecksum,
    /// When the scanner observed this blob version
    pub observed_at: DateTime<Utc>,
    /// Institutional type written back by the classifier
    pub detected_doc_type: Option<DocType>,
}

impl DocumentRegistryEntry {
    /// Create an Active, internal entry with defaults
    #[must_use]
    pub fn new(
        fund: FundId,
        container: impl Into<String>,
        blob_path: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            fund,
            id: DocumentId::new(),
            container: container.into(),
            blob_path: blob_path.into(),
            title: title.into(),
            authority_tag: String::new(),
            domain_tag: None,
            shareability: Shareability::Internal,
            lifecycle: LifecycleStage::Active,
            checksum: ContentChecksum::default(),
            observed_at: Utc::now(),
            detected_doc_type: None,
        }
    }

    /// With observation timestamp
    #[inline]
    #[must_use]
    pub fn with_observed_at(mut self, observed_at: DateTime<Utc>) -> Self {
        self.observed_at = observed_at;
        self
    }

    /// With raw authority tag
    #[inline]
    #[must_use]
    pub fn with_authority_tag(mut self, tag: impl Into<String>) -> Self {
        self.authority_tag = tag.into();
        self
    }

    /// With domain tag
    #[inline]
    #[must_use]
    pub fn with_domain_tag(mut self, tag: impl Into<String>) -> Self {
        self.domain_tag = Some(tag.into());
        self
    }

    /// With shareability
    #[inline]
    #[must_use]
    pub fn with_shareability(mut self, shareability: Shareability) -> Self {
        self.shareability = shareability;
        self
    }

    /// With lifecycle stage
    #[inline]
    #[must_use]
    pub fn with_lifecycle(mut self, lifecycle: LifecycleStage) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// With content checksum
    #[inline]
    #[must_use]
    pub fn with_checksum(mut self, checksum: ContentChecksum) -> Self {
        self.checksum = checksum;
        self
    }

    /// Whether this entry is in scope for classification and linking
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lifecycle == LifecycleStage::Active
    }

    /// Record the classifier's verdict: the single engine write-back
    #[inline]
    pub fn set_detected_doc_type(&mut self, doc_type: DocType) {
        self.detected_doc_type = Some(doc_type);
    }
}
