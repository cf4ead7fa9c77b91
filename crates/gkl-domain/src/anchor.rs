//! Knowledge anchors
//!
//! Typed fact anchors extracted from document text. Anchors are a derived
//! cache: every extraction run fully replaces a document's anchor set,
//! never merges into it.

use crate::ids::{DocumentId, FundId};
use serde::{Deserialize, Serialize};

/// Type of fact an anchor records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorType {
    /// The fund's own name appears in the text
    FundName,
    /// A service-provider role is named
    ProviderName,
    /// An ISO-like effective date
    EffectiveDate,
    /// A governing-law clause
    GoverningLaw,
    /// A section / regulatory reference
    RegulatoryReference,
    /// An obligation keyword (must, shall, …)
    ObligationKeyword,
    /// Fallback carrying the classified type when nothing else anchored
    DocTypeFallback,
}

/// One typed fact anchor on a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeAnchor {
    /// Owning fund scope
    pub fund: FundId,
    /// Source document
    pub document: DocumentId,
    /// Fact type
    pub anchor_type: AnchorType,
    /// Extracted value
    pub value: String,
    /// Clipped source snippet for evidentiary traceability
    pub snippet: String,
    /// Optional page reference
    pub page: Option<u32>,
}

impl KnowledgeAnchor {
    /// Create an anchor
    #[inline]
    #[must_use]
    pub fn new(
        fund: FundId,
        document: DocumentId,
        anchor_type: AnchorType,
        value: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            fund,
            document,
            anchor_type,
            value: value.into(),
            snippet: snippet.into(),
            page: None,
        }
    }

    /// With page reference
    #[inline]
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_builder() {
        let anchor = KnowledgeAnchor::new(
            FundId::new(),
            DocumentId::new(),
            AnchorType::EffectiveDate,
            "2025-03-31",
            "effective as of 2025-03-31",
        )
        .with_page(4);
        assert_eq!(anchor.anchor_type, AnchorType::EffectiveDate);
        assert_eq!(anchor.page, Some(4));
    }
}
