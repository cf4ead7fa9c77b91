//! Document governance profiles
//!
//! One profile per (fund, document): the resolved authority tier, the
//! binding scope, the final shareability, and a best-effort jurisdiction
//! hint. The resolved tier is always a member of the five-tier scale,
//! even when the container tag was unrecognized.

use crate::authority::{AuthorityTier, BindingScope};
use crate::ids::{DocumentId, FundId};
use crate::registry::Shareability;
use serde::{Deserialize, Serialize};

/// Resolved governance posture of one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentGovernanceProfile {
    /// Owning fund scope
    pub fund: FundId,
    /// Profiled document
    pub document: DocumentId,
    /// Resolved authority tier
    pub resolved_authority: AuthorityTier,
    /// Organizational scope of any obligations it binds
    pub binding_scope: BindingScope,
    /// Shareability after governance review
    pub shareability_final: Shareability,
    /// Best-effort jurisdiction hint, not authoritative
    pub jurisdiction: Option<String>,
}

impl DocumentGovernanceProfile {
    /// Create a profile row
    #[inline]
    #[must_use]
    pub fn new(
        fund: FundId,
        document: DocumentId,
        resolved_authority: AuthorityTier,
        binding_scope: BindingScope,
        shareability_final: Shareability,
        jurisdiction: Option<String>,
    ) -> Self {
        Self {
            fund,
            document,
            resolved_authority,
            binding_scope,
            shareability_final,
            jurisdiction,
        }
    }

    /// Merge a re-resolution into this row
    ///
    /// Key fields (fund, document) are creation-only and never change.
    pub fn apply_patch(&mut self, patch: &DocumentGovernanceProfile) {
        self.resolved_authority = patch.resolved_authority;
        self.binding_scope = patch.binding_scope;
        self.shareability_final = patch.shareability_final;
        self.jurisdiction = patch.jurisdiction.clone();
    }
}
