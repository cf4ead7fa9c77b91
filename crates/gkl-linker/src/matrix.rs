//! The authority/permission matrix
//!
//! For every trust tier, the closed set of link types a source document
//! at that tier may assert. This is the enforcement point that keeps a
//! pipeline memo from deriving an obligation and a marketing deck from
//! satisfying one. The sets are part of the public contract:
//!
//! - Binding, Policy → every type except Satisfies
//! - Intelligence → References, RelatesToManager, RelatesToDeal
//! - Evidence → Satisfies, References
//! - Narrative (and anything else) → References only

use gkl_domain::{AuthorityTier, LinkType};

/// Allowed link types for a source document at `tier`
#[must_use]
pub fn allowed_link_types(tier: AuthorityTier) -> &'static [LinkType] {
    match tier {
        AuthorityTier::Binding | AuthorityTier::Policy => &[
            LinkType::References,
            LinkType::DerivesObligation,
            LinkType::ConflictsWith,
            LinkType::Requires,
            LinkType::RelatesToManager,
            LinkType::RelatesToDeal,
        ],
        AuthorityTier::Intelligence => &[
            LinkType::References,
            LinkType::RelatesToManager,
            LinkType::RelatesToDeal,
        ],
        AuthorityTier::Evidence => &[LinkType::Satisfies, LinkType::References],
        AuthorityTier::Narrative => &[LinkType::References],
    }
}

/// Whether a source document at `tier` may assert `link_type`
#[inline]
#[must_use]
pub fn permits(tier: AuthorityTier, link_type: LinkType) -> bool {
    allowed_link_types(tier).contains(&link_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_and_policy_never_satisfy() {
        for tier in [AuthorityTier::Binding, AuthorityTier::Policy] {
            assert!(!permits(tier, LinkType::Satisfies));
            assert!(permits(tier, LinkType::DerivesObligation));
            assert!(permits(tier, LinkType::ConflictsWith));
            assert!(permits(tier, LinkType::Requires));
        }
    }

    #[test]
    fn intelligence_is_capped_at_relations() {
        assert!(permits(AuthorityTier::Intelligence, LinkType::References));
        assert!(permits(AuthorityTier::Intelligence, LinkType::RelatesToManager));
        assert!(permits(AuthorityTier::Intelligence, LinkType::RelatesToDeal));
        assert!(!permits(AuthorityTier::Intelligence, LinkType::DerivesObligation));
        assert!(!permits(AuthorityTier::Intelligence, LinkType::Satisfies));
        assert!(!permits(AuthorityTier::Intelligence, LinkType::ConflictsWith));
    }

    #[test]
    fn evidence_only_satisfies_and_references() {
        assert_eq!(
            allowed_link_types(AuthorityTier::Evidence),
            &[LinkType::Satisfies, LinkType::References]
        );
    }

    #[test]
    fn narrative_only_references() {
        assert_eq!(allowed_link_types(AuthorityTier::Narrative), &[LinkType::References]);
    }

    #[test]
    fn references_is_universal() {
        for tier in [
            AuthorityTier::Narrative,
            AuthorityTier::Intelligence,
            AuthorityTier::Evidence,
            AuthorityTier::Policy,
            AuthorityTier::Binding,
        ] {
            assert!(permits(tier, LinkType::References));
        }
    }
}
