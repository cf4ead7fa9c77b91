//! Authority tiers and binding scope
//!
//! The five-tier authority scale is the backbone of every gating decision
//! in the engine: which link types a document may assert, whether it can
//! derive or conflict obligations, and whether it may satisfy evidence.

use serde::{Deserialize, Serialize};

/// Authority tier of a document, totally ordered by binding weight
///
/// Narrative(1) < Intelligence(2) < Evidence(3) < Policy(4) < Binding(5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorityTier {
    /// Investor-facing narrative and marketing material
    Narrative,
    /// Pipeline intelligence: memos, deal notes, screens
    Intelligence,
    /// Operational evidence: reports, statements, records
    Evidence,
    /// Internal policy: risk and operating policies
    Policy,
    /// Binding instruments: regulation, constitution, executed contracts
    Binding,
}

impl AuthorityTier {
    /// Numeric rank in the total order (1..=5)
    #[inline]
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            AuthorityTier::Narrative => 1,
            AuthorityTier::Intelligence => 2,
            AuthorityTier::Evidence => 3,
            AuthorityTier::Policy => 4,
            AuthorityTier::Binding => 5,
        }
    }

    /// Canonical uppercase tag as stored on containers
    #[inline]
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            AuthorityTier::Narrative => "NARRATIVE",
            AuthorityTier::Intelligence => "INTELLIGENCE",
            AuthorityTier::Evidence => "EVIDENCE",
            AuthorityTier::Policy => "POLICY",
            AuthorityTier::Binding => "BINDING",
        }
    }

    /// Parse a container authority tag, case-insensitively
    #[must_use]
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "NARRATIVE" => Some(AuthorityTier::Narrative),
            "INTELLIGENCE" => Some(AuthorityTier::Intelligence),
            "EVIDENCE" => Some(AuthorityTier::Evidence),
            "POLICY" => Some(AuthorityTier::Policy),
            "BINDING" => Some(AuthorityTier::Binding),
            _ => None,
        }
    }

    /// Parse a container tag, defaulting unrecognized tags to Evidence
    #[inline]
    #[must_use]
    pub fn from_tag_or_default(tag: &str) -> Self {
        Self::parse_tag(tag).unwrap_or(AuthorityTier::Evidence)
    }

    /// The greater of two tiers by rank
    #[inline]
    #[must_use]
    pub fn max_by_rank(self, other: Self) -> Self {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// Whether this tier carries obligation-grade weight (Policy or Binding)
    #[inline]
    #[must_use]
    pub fn is_obligation_grade(&self) -> bool {
        self.rank() >= AuthorityTier::Policy.rank()
    }
}

impl std::fmt::Display for AuthorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Organizational unit a binding obligation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindingScope {
    /// The fund itself
    Fund,
    /// A contracted service provider
    ServiceProvider,
    /// The investment manager
    Manager,
}
