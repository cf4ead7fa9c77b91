//! GKL Document Profiling
//!
//! The per-document ingress passes of the knowledge-linking engine:
//!
//! - [`AuthorityResolver`]: container trust tier + document-type override
//!   → resolved authority, binding scope, jurisdiction hint
//! - [`DocumentClassifier`]: ordered first-match-wins decision list over
//!   container, filename, and content signals
//! - [`AnchorExtractor`]: typed fact anchors (dates, governing law,
//!   section references, obligation keywords, named roles)
//! - [`CorpusProvider`] / [`DocumentCorpus`]: the only fallible seam;
//!   text retrieval returns `Result`, and the calling pipeline owns the
//!   degraded-text fallback policy
//!
//! Every pass is a total function: empty or garbage input degrades to a
//! default verdict, never to an error.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod anchors;
mod authority;
mod classifier;
mod corpus;
mod error;

pub use anchors::{AnchorConfig, AnchorExtractor};
pub use authority::{AuthorityConfig, AuthorityResolver, GovernanceRuling};
pub use classifier::{ClassifierConfig, ClassifierVerdict, DocumentClassifier};
pub use corpus::{CorpusProvider, DocumentCorpus, TextChunk, MAX_CORPUS_CHUNKS};
pub use error::ExtractionError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
