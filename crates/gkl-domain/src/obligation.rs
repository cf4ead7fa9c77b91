//! Obligation register rows and evidence maps
//!
//! The register is produced by an external obligation-extraction pass;
//! this engine only consumes it. The evidence map is this engine's
//! satisfaction record: one row per obligation entity, pointing at the
//! best-matching evidentiary document, if any.

use crate::ids::{DocumentId, EntityId, FundId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Register status of an obligation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObligationStatus {
    /// Outstanding
    Open,
    /// Confirmed satisfied by the register owner
    Satisfied,
    /// Waived
    Waived,
}

/// A textual obligation derived from binding or regulatory documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObligationRegisterEntry {
    /// Owning fund scope
    pub fund: FundId,
    /// Stable register identifier, e.g. `OBL-2025-014`
    pub obligation_id: String,
    /// Obligation text as extracted
    pub obligation_text: String,
    /// Due rule, free text; unset means ongoing
    pub due_rule: Option<String>,
    /// Recurrence, free text
    pub frequency: Option<String>,
    /// Responsible party, free text
    pub responsible_party: Option<String>,
    /// Register status
    pub status: ObligationStatus,
    /// Registry documents the obligation was derived from
    pub source_document_ids: Vec<DocumentId>,
    /// When the register recorded this row
    pub recorded_at: DateTime<Utc>,
}

impl ObligationRegisterEntry {
    /// Create an Open register row recorded at `recorded_at`
    #[must_use]
    pub fn new(
        fund: FundId,
        obligation_id: impl Into<String>,
        obligation_text: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            fund,
            obligation_id: obligation_id.into(),
            obligation_text: obligation_text.into(),
            due_rule: None,
            frequency: None,
            responsible_party: None,
            status: ObligationStatus::Open,
            source_document_ids: Vec::new(),
            recorded_at,
        }
    }

    /// With due rule
    #[inline]
    #[must_use]
    pub fn with_due_rule(mut self, due_rule: impl Into<String>) -> Self {
        self.due_rule = Some(due_rule.into());
        self
    }

    /// With frequency
    #[inline]
    #[must_use]
    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    /// With responsible party
    #[inline]
    #[must_use]
    pub fn with_responsible_party(mut self, party: impl Into<String>) -> Self {
        self.responsible_party = Some(party.into());
        self
    }

    /// With a source registry document
    #[inline]
    #[must_use]
    pub fn with_source_document(mut self, document: DocumentId) -> Self {
        self.source_document_ids.push(document);
        self
    }
}

/// Evidence-scoring outcome for one obligation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SatisfactionStatus {
    /// Strong term overlap with an evidence document
    Matched,
    /// Weak but non-zero overlap
    Partial,
    /// No evidence document shares any significant term
    None,
}

/// Satisfaction record linking an obligation entity to its best evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObligationEvidenceMap {
    /// Owning fund scope
    pub fund: FundId,
    /// The OBLIGATION-type entity this row scores
    pub obligation_entity: EntityId,
    /// Best-matching evidence document, if any
    pub evidence_document: Option<DocumentId>,
    /// Scoring outcome
    pub satisfaction_status: SatisfactionStatus,
    /// Scoring confidence, 0.0–1.0
    pub confidence: f64,
    /// When the mapper last scored this obligation
    pub last_checked_at: DateTime<Utc>,
}

impl ObligationEvidenceMap {
    /// Create a satisfaction record
    #[must_use]
    pub fn new(
        fund: FundId,
        obligation_entity: EntityId,
        evidence_document: Option<DocumentId>,
        satisfaction_status: SatisfactionStatus,
        confidence: f64,
        last_checked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            fund,
            obligation_entity,
            evidence_document,
            satisfaction_status,
            confidence,
            last_checked_at,
        }
    }

    /// Merge a re-score into this row; key fields never change
    pub fn apply_patch(&mut self, patch: &ObligationEvidenceMap) {
        self.evidence_document = patch.evidence_document;
        self.satisfaction_status = patch.satisfaction_status;
        self.confidence = patch.confidence;
        self.last_checked_at = patch.last_checked_at;
    }
}
