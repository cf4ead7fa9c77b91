//! GKL Domain Model
//!
//! Typed rows for the per-fund governance knowledge graph.
//!
//! # Core Concepts
//!
//! - [`AuthorityTier`]: the 5-tier, totally ordered binding-weight scale
//! - [`DocumentRegistryEntry`]: a physical document observed in a container
//! - [`KnowledgeEntity`] / [`KnowledgeLink`]: canonical nodes and the
//!   authority-gated directed edges pointing at them
//! - [`ObligationRegisterEntry`] / [`ObligationEvidenceMap`]: textual
//!   obligations and their best-evidence satisfaction records
//!
//! All rows are exclusively owned by a fund scope and carry explicit
//! `apply_patch` merges for idempotent upsert: mutable fields are merged
//! field by field, creation-only fields (ids, keys, created timestamps)
//! are never overwritten.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod anchor;
mod authority;
mod checksum;
mod classification;
mod doc_type;
mod entity;
mod feeds;
mod ids;
mod link;
mod obligation;
mod profile;
mod registry;
mod snapshot;

pub mod text;

pub use anchor::{AnchorType, KnowledgeAnchor};
pub use authority::{AuthorityTier, BindingScope};
pub use checksum::{ChecksumError, ContentChecksum};
pub use classification::{ClassificationBasis, DocumentClassification, SignalSource};
pub use doc_type::DocType;
pub use entity::{EntityKey, EntityType, KnowledgeEntity};
pub use feeds::{DealRecord, ManagerProfile};
pub use ids::{DocumentId, EntityId, FundId, LinkId};
pub use link::{KnowledgeLink, LinkKey, LinkType};
pub use obligation::{
    ObligationEvidenceMap, ObligationRegisterEntry, ObligationStatus, SatisfactionStatus,
};
pub use profile::DocumentGovernanceProfile;
pub use registry::{DocumentRegistryEntry, LifecycleStage, Shareability};
pub use snapshot::FundSnapshot;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
