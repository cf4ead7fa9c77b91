//! Document corpus assembly
//!
//! The searchable corpus of a document is the normalized concatenation of
//! its title, blob path, and up to 60 associated text-chunk bodies. Chunk
//! retrieval is the engine's only fallible seam: [`CorpusProvider`]
//! returns a `Result`, and the calling pipeline decides the fallback
//! (degraded title + path text): the core passes never see a failure.

use crate::error::ExtractionError;
use gkl_domain::text::normalize;
use gkl_domain::DocumentRegistryEntry;
use serde::{Deserialize, Serialize};

/// Maximum chunk bodies folded into one searchable corpus
pub const MAX_CORPUS_CHUNKS: usize = 60;

/// One extracted text chunk of a document version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Chunk sequence number within the document
    pub seq: u32,
    /// Chunk body text
    pub body: String,
}

impl TextChunk {
    /// Create a chunk
    #[inline]
    #[must_use]
    pub fn new(seq: u32, body: impl Into<String>) -> Self {
        Self {
            seq,
            body: body.into(),
        }
    }
}

/// Retrieves extracted text chunks for a document version
///
/// Implemented by the persistence collaborator. Failures are explicit;
/// the caller owns the fallback policy.
pub trait CorpusProvider {
    /// Text chunks for the entry's current version, in sequence order
    fn chunks(&self, entry: &DocumentRegistryEntry) -> Result<Vec<TextChunk>, ExtractionError>;
}

/// Assembled text views over one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCorpus {
    raw_text: String,
    searchable: String,
}

impl DocumentCorpus {
    /// Assemble from registry metadata plus extracted chunks
    #[must_use]
    pub fn assemble(entry: &DocumentRegistryEntry, chunks: &[TextChunk]) -> Self {
        let mut raw_text = String::new();
        for chunk in chunks.iter().take(MAX_CORPUS_CHUNKS) {
            if !raw_text.is_empty() {
                raw_text.push('\n');
            }
            raw_text.push_str(&chunk.body);
        }
        let searchable = normalize(&format!(
            "{} {} {}",
            entry.title, entry.blob_path, raw_text
        ));
        Self {
            raw_text,
            searchable,
        }
    }

    /// Degraded corpus from registry metadata only (title + path)
    ///
    /// Used by the pipeline when chunk retrieval fails, so classification
    /// and anchoring always receive a string.
    #[must_use]
    pub fn degraded(entry: &DocumentRegistryEntry) -> Self {
        let raw_text = format!("{} {}", entry.title, entry.blob_path);
        let searchable = normalize(&raw_text);
        Self {
            raw_text,
            searchable,
        }
    }

    /// Concatenated chunk bodies (raw, for classification and anchoring)
    #[inline]
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Normalized searchable corpus (title + path + chunks)
    #[inline]
    #[must_use]
    pub fn searchable(&self) -> &str {
        &self.searchable
    }

    /// Whether a normalized term appears in the searchable corpus
    #[inline]
    #[must_use]
    pub fn contains_term(&self, term: &str) -> bool {
        !term.is_empty() && self.searchable.contains(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gkl_domain::FundId;
    use pretty_assertions::assert_eq;

    fn entry() -> DocumentRegistryEntry {
        DocumentRegistryEntry::new(
            FundId::new(),
            "portfolio-evidence",
            "reports/Q3-Portfolio.pdf",
            "Q3 Portfolio Report",
        )
    }

    #[test]
    fn assemble_folds_title_path_and_chunks() {
        let corpus = DocumentCorpus::assemble(
            &entry(),
            &[
                TextChunk::new(0, "Aurora exposure grew."),
                TextChunk::new(1, "Custodian confirmed holdings."),
            ],
        );
        assert!(corpus.contains_term("q3 portfolio report"));
        assert!(corpus.contains_term("reports q3 portfolio pdf"));
        assert!(corpus.contains_term("aurora exposure"));
        assert!(corpus.contains_term("custodian confirmed"));
    }

    #[test]
    fn assemble_caps_chunk_count() {
        let chunks: Vec<TextChunk> = (0..80)
            .map(|i| TextChunk::new(i, format!("chunkmarker{i:03}")))
            .collect();
        let corpus = DocumentCorpus::assemble(&entry(), &chunks);
        assert!(corpus.contains_term("chunkmarker059"));
        assert!(!corpus.contains_term("chunkmarker060"));
    }

    #[test]
    fn degraded_keeps_title_and_path() {
        let corpus = DocumentCorpus::degraded(&entry());
        assert_eq!(corpus.searchable(), "q3 portfolio report reports q3 portfolio pdf");
        assert!(corpus.raw_text().contains("Q3 Portfolio Report"));
    }

    #[test]
    fn empty_term_never_matches() {
        let corpus = DocumentCorpus::degraded(&entry());
        assert!(!corpus.contains_term(""));
    }
}
