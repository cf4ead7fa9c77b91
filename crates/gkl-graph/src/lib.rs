//! GKL Knowledge Graph
//!
//! The per-fund knowledge-graph store and the entity index the linker
//! scans against.
//!
//! # Core Concepts
//!
//! - [`GraphStore`]: idempotent keyed upserts for every derived row; the
//!   persistence collaborator provides atomicity, this crate provides the
//!   key discipline
//! - [`InMemoryGraphStore`]: reference implementation with deterministic
//!   insertion-order iteration
//! - [`EntityIndexBuilder`] / [`EntityIndex`]: deduplicated canonical
//!   entities plus their matchable term sets, built once per run

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod index;
mod store;

pub use index::{EntityIndex, EntityIndexBuilder, IndexConfig, IndexedEntity};
pub use store::{GraphStore, InMemoryGraphStore, UpsertOutcome};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
