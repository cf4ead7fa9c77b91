//! GKL Cross-Container Linking
//!
//! The algorithmic core of the knowledge-linking engine:
//!
//! - [`matrix`]: the authority/permission matrix gating which semantic
//!   relations a document may assert at each trust tier
//! - [`CrossContainerLinker`]: scans the entity index against each
//!   document's searchable corpus and upserts authority-gated links
//! - [`ObligationEvidenceMapper`]: scores evidence-document term overlap
//!   per obligation and records satisfaction status
//! - [`ConflictDetector`]: groups obligations by normalized text and
//!   flags divergent due rules on binding-grade sources

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod conflict;
mod evidence;
mod linker;
pub mod matrix;

pub use conflict::{ConflictDetector, ConflictStats};
pub use evidence::{EvidenceConfig, EvidenceStats, ObligationEvidenceMapper};
pub use linker::{CrossContainerLinker, LinkStats, LinkerConfig};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
