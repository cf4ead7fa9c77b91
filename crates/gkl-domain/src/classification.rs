//! Document classification rows
//!
//! One classification per (fund, document): the detected institutional
//! type, a fixed-band confidence score, and the basis recording which
//! signal categories contributed to the verdict.

use crate::doc_type::DocType;
use crate::ids::{DocumentId, FundId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Signal category that contributed to a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignalSource {
    /// Container identity or tag
    Container,
    /// Extracted document text
    Content,
    /// Blob filename / title
    Filename,
}

impl SignalSource {
    /// Lowercase label used in the rendered basis
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SignalSource::Container => "container",
            SignalSource::Content => "content",
            SignalSource::Filename => "filename",
        }
    }
}

/// Deduplicated, sorted set of contributing signal categories
///
/// Rendering is canonical: the same signals always produce the same
/// string regardless of the order branches recorded them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationBasis(BTreeSet<SignalSource>);

impl ClassificationBasis {
    /// Empty basis
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Basis from a list of signals (duplicates collapse)
    #[must_use]
    pub fn from_signals(signals: &[SignalSource]) -> Self {
        Self(signals.iter().copied().collect())
    }

    /// Record a contributing signal
    #[inline]
    pub fn record(&mut self, signal: SignalSource) {
        self.0.insert(signal);
    }

    /// Whether a signal contributed
    #[inline]
    #[must_use]
    pub fn contains(&self, signal: SignalSource) -> bool {
        self.0.contains(&signal)
    }

    /// Whether no signal contributed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical rendering, e.g. `container+filename`
    #[must_use]
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(SignalSource::label)
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl std::fmt::Display for ClassificationBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Classification verdict for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentClassification {
    /// Owning fund scope
    pub fund: FundId,
    /// Classified document
    pub document: DocumentId,
    /// Detected institutional type
    pub doc_type: DocType,
    /// Fixed-band confidence, 0–100
    pub confidence: u8,
    /// Contributing signal categories
    pub basis: ClassificationBasis,
}

impl DocumentClassification {
    /// Create a classification row
    #[inline]
    #[must_use]
    pub fn new(
        fund: FundId,
        document: DocumentId,
        doc_type: DocType,
        confidence: u8,
        basis: ClassificationBasis,
    ) -> Self {
        Self {
            fund,
            document,
            doc_type,
            confidence,
            basis,
        }
    }

    /// Merge a re-classification into this row
    ///
    /// Key fields (fund, document) are creation-only and never change;
    /// the verdict fields are replaced wholesale.
    pub fn apply_patch(&mut self, patch: &DocumentClassification) {
        self.doc_type = patch.doc_type;
        self.confidence = patch.confidence;
        self.basis = patch.basis.clone();
    }
}
