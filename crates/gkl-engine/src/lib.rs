//! GKL Linking Engine
//!
//! The per-fund pipeline orchestrator. One [`LinkingPipeline::run`] call
//! executes the full pass over a fund snapshot:
//!
//! 1. classify, profile, and anchor every active document
//! 2. build the entity index (empty index blocks the run)
//! 3. link every document against the index
//! 4. score obligation evidence
//! 5. detect binding-obligation conflicts
//!
//! and returns a [`RunSummary`] for the monitoring collaborator. The run
//! is synchronous, single-threaded, fund-scoped, and idempotent: a
//! caller-level abort between steps leaves only keyed upserts behind.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod pipeline;
mod summary;

pub use pipeline::{LinkingPipeline, PipelineConfig};
pub use summary::{RunCounts, RunStatus, RunSummary};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
