//! Run summaries
//!
//! The structured result a pipeline run hands to the monitoring and
//! alerting collaborator, serialized as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall outcome of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// The entity index was empty: nothing could be linked
    Block,
    /// At least one binding-obligation conflict was detected
    Partial,
    /// The run completed without conflicts
    Pass,
}

/// Counters accumulated across one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    /// Distinct entities that received at least one link
    pub entities_linked: usize,
    /// New link rows created (linking + evidence + conflicts)
    pub links_created: usize,
    /// Obligations whose evidence reached full-match strength
    pub obligations_satisfied: usize,
    /// Register rows belonging to a conflicting group
    pub conflicts_detected: usize,
}

/// Structured result of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Pipeline mode label
    pub mode: String,
    /// The as-of instant the run was scoped to
    pub as_of: DateTime<Utc>,
    /// Overall outcome
    pub status: RunStatus,
    /// Accumulated counters
    pub payload: RunCounts,
}

impl RunSummary {
    /// Create a summary
    #[inline]
    #[must_use]
    pub fn new(
        mode: impl Into<String>,
        as_of: DateTime<Utc>,
        status: RunStatus,
        payload: RunCounts,
    ) -> Self {
        Self {
            mode: mode.into(),
            as_of,
            status,
            payload,
        }
    }
}
