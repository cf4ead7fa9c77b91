//! Canonical feed rows consumed from upstream collaborators
//!
//! Manager profiles and deal records arrive from their own registries;
//! the entity index builder turns them into knowledge entities.

use crate::ids::FundId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A manager profile row from the manager registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerProfile {
    /// Owning fund scope
    pub fund: FundId,
    /// Manager name as registered
    pub name: String,
    /// Strategy description, free text
    pub strategy: Option<String>,
    /// When the registry recorded this row
    pub recorded_at: DateTime<Utc>,
}

impl ManagerProfile {
    /// Create a manager profile recorded at `recorded_at`
    #[must_use]
    pub fn new(fund: FundId, name: impl Into<String>, recorded_at: DateTime<Utc>) -> Self {
        Self {
            fund,
            name: name.into(),
            strategy: None,
            recorded_at,
        }
    }

    /// With strategy description
    #[inline]
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }
}

/// A deal row from the deal registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    /// Owning fund scope
    pub fund: FundId,
    /// Deal name as registered
    pub name: String,
    /// Sponsor name, if known
    pub sponsor: Option<String>,
    /// When the registry recorded this row
    pub recorded_at: DateTime<Utc>,
}

impl DealRecord {
    /// Create a deal record recorded at `recorded_at`
    #[must_use]
    pub fn new(fund: FundId, name: impl Into<String>, recorded_at: DateTime<Utc>) -> Self {
        Self {
            fund,
            name: name.into(),
            sponsor: None,
            recorded_at,
        }
    }

    /// With sponsor name
    #[inline]
    #[must_use]
    pub fn with_sponsor(mut self, sponsor: impl Into<String>) -> Self {
        self.sponsor = Some(sponsor.into());
        self
    }
}
