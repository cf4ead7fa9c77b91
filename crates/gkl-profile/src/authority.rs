//! Authority resolution
//!
//! Resolves a document's binding weight from its container trust tier and
//! its detected document type. Total: always returns a ruling, falling
//! back to Evidence for unrecognized container tags.

use gkl_domain::{AuthorityTier, BindingScope, DocType, Shareability};
use serde::{Deserialize, Serialize};

/// Resolution tables, injected at construction time
///
/// The defaults carry the production tables; tests may override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityConfig {
    /// Document types that force a tier regardless of container tag
    /// (subject to the anti-inversion rule)
    pub overrides: Vec<(DocType, AuthorityTier)>,
    /// Case-insensitive substring markers → jurisdiction names
    pub jurisdiction_markers: Vec<(String, String)>,
}

impl AuthorityConfig {
    /// Production override and jurisdiction tables
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the override table
    #[inline]
    #[must_use]
    pub fn with_overrides(mut self, overrides: Vec<(DocType, AuthorityTier)>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Replace the jurisdiction marker table
    #[inline]
    #[must_use]
    pub fn with_jurisdiction_markers(mut self, markers: Vec<(String, String)>) -> Self {
        self.jurisdiction_markers = markers;
        self
    }

    /// Tier forced by a document type, if any
    #[must_use]
    pub fn override_for(&self, doc_type: DocType) -> Option<AuthorityTier> {
        self.overrides
            .iter()
            .find(|(d, _)| *d == doc_type)
            .map(|(_, tier)| *tier)
    }
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            overrides: vec![
                (DocType::Regulatory, AuthorityTier::Binding),
                (DocType::FundConstitution, AuthorityTier::Binding),
                (DocType::ServiceProviderContract, AuthorityTier::Binding),
                (DocType::Marketing, AuthorityTier::Narrative),
                (DocType::InvestorNarrative, AuthorityTier::Narrative),
            ],
            jurisdiction_markers: vec![
                ("cima".to_string(), "Cayman Islands".to_string()),
                ("cayman".to_string(), "Cayman Islands".to_string()),
                ("fca".to_string(), "United Kingdom".to_string()),
                ("sec".to_string(), "United States".to_string()),
                ("delaware".to_string(), "United States".to_string()),
                ("cssf".to_string(), "Luxembourg".to_string()),
                ("luxembourg".to_string(), "Luxembourg".to_string()),
                ("ireland".to_string(), "Ireland".to_string()),
            ],
        }
    }
}

/// Resolved governance posture for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceRuling {
    /// Resolved authority tier
    pub resolved_authority: AuthorityTier,
    /// Organizational scope of any obligations the document binds
    pub binding_scope: BindingScope,
    /// Best-effort jurisdiction hint
    pub jurisdiction: Option<String>,
}

/// Resolves container trust tier + document-type override into a ruling
#[derive(Debug, Clone, Default)]
pub struct AuthorityResolver {
    config: AuthorityConfig,
}

impl AuthorityResolver {
    /// Create a resolver with the production tables
    #[inline]
    #[must_use]
    pub fn new(config: AuthorityConfig) -> Self {
        Self { config }
    }

    /// Resolve the authority tier for a container tag and document type
    ///
    /// Anti-inversion: a document stored in an Intelligence container can
    /// never acquire Binding authority from its type override: the
    /// resolved tier stays Intelligence. Every other combination resolves
    /// to `max(container tier, override tier)` by rank. The rule is
    /// intentionally asymmetric: no analogous guard exists for Narrative
    /// containers.
    #[must_use]
    pub fn resolve_tier(&self, container_tag: &str, doc_type: DocType) -> AuthorityTier {
        let container_tier = AuthorityTier::from_tag_or_default(container_tag);
        let Some(override_tier) = self.config.override_for(doc_type) else {
            return container_tier;
        };
        if container_tier == AuthorityTier::Intelligence
            && override_tier == AuthorityTier::Binding
        {
            return AuthorityTier::Intelligence;
        }
        container_tier.max_by_rank(override_tier)
    }

    /// Binding scope is a pure function of document type
    #[must_use]
    pub fn binding_scope(&self, doc_type: DocType) -> BindingScope {
        match doc_type {
            DocType::Regulatory | DocType::FundConstitution | DocType::RiskPolicy => {
                BindingScope::Fund
            }
            DocType::ServiceProviderContract => BindingScope::ServiceProvider,
            DocType::InvestmentMemo | DocType::Marketing => BindingScope::Manager,
            _ => BindingScope::Fund,
        }
    }

    /// Infer a jurisdiction hint from container name, blob path, and type
    ///
    /// Case-insensitive substring scan against the marker table; first
    /// marker wins. Best-effort only, never authoritative.
    #[must_use]
    pub fn infer_jurisdiction(
        &self,
        container: &str,
        blob_path: &str,
        doc_type: DocType,
    ) -> Option<String> {
        let haystack = format!(
            "{} {} {}",
            container.to_lowercase(),
            blob_path.to_lowercase(),
            doc_type.label()
        );
        self.config
            .jurisdiction_markers
            .iter()
            .find(|(marker, _)| haystack.contains(marker.as_str()))
            .map(|(_, jurisdiction)| jurisdiction.clone())
    }

    /// Full ruling for one document
    #[must_use]
    pub fn resolve(
        &self,
        container_tag: &str,
        doc_type: DocType,
        container: &str,
        blob_path: &str,
    ) -> GovernanceRuling {
        GovernanceRuling {
            resolved_authority: self.resolve_tier(container_tag, doc_type),
            binding_scope: self.binding_scope(doc_type),
            jurisdiction: self.infer_jurisdiction(container, blob_path, doc_type),
        }
    }

    /// Final shareability after governance review
    ///
    /// Binding instruments never ship investor-facing as a side effect of
    /// profiling; everything else carries the registry value through.
    #[must_use]
    pub fn final_shareability(
        &self,
        recorded: Shareability,
        resolved: AuthorityTier,
    ) -> Shareability {
        if resolved == AuthorityTier::Binding {
            Shareability::Internal
        } else {
            recorded
        }
    }

    /// The injected configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AuthorityConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unrecognized_container_defaults_to_evidence() {
        let resolver = AuthorityResolver::default();
        assert_eq!(
            resolver.resolve_tier("random-tag", DocType::Other),
            AuthorityTier::Evidence
        );
    }

    #[test]
    fn override_raises_container_tier() {
        let resolver = AuthorityResolver::default();
        assert_eq!(
            resolver.resolve_tier("EVIDENCE", DocType::Regulatory),
            AuthorityTier::Binding
        );
        assert_eq!(
            resolver.resolve_tier("NARRATIVE", DocType::ServiceProviderContract),
            AuthorityTier::Binding
        );
    }

    #[test]
    fn unlisted_doc_types_follow_the_container() {
        let resolver = AuthorityResolver::default();
        // Risk policies carry Policy weight through their container, not
        // through a type override.
        assert_eq!(
            resolver.resolve_tier("POLICY", DocType::RiskPolicy),
            AuthorityTier::Policy
        );
        assert_eq!(
            resolver.resolve_tier("INTELLIGENCE", DocType::InvestmentMemo),
            AuthorityTier::Intelligence
        );
    }

    #[test]
    fn container_tier_wins_when_higher() {
        let resolver = AuthorityResolver::default();
        // Binding container holding a memo stays Binding
        assert_eq!(
            resolver.resolve_tier("BINDING", DocType::InvestmentMemo),
            AuthorityTier::Binding
        );
    }

    #[test]
    fn anti_inversion_holds_for_every_override() {
        // An Intelligence container caps every overridden type at
        // Intelligence: Binding overrides hit the anti-inversion guard,
        // Narrative overrides lose to max rank.
        let resolver = AuthorityResolver::default();
        for (doc_type, _) in &AuthorityConfig::default().overrides {
            assert_eq!(
                resolver.resolve_tier("INTELLIGENCE", *doc_type),
                AuthorityTier::Intelligence,
                "unexpected escalation for {doc_type}"
            );
        }
    }

    #[test]
    fn narrative_container_is_not_guarded() {
        // The asymmetry is intentional: a Binding override in a Narrative
        // container still resolves to Binding via max rank.
        let resolver = AuthorityResolver::default();
        assert_eq!(
            resolver.resolve_tier("NARRATIVE", DocType::Regulatory),
            AuthorityTier::Binding
        );
    }

    #[test]
    fn binding_scope_by_doc_type() {
        let resolver = AuthorityResolver::default();
        assert_eq!(resolver.binding_scope(DocType::Regulatory), BindingScope::Fund);
        assert_eq!(
            resolver.binding_scope(DocType::ServiceProviderContract),
            BindingScope::ServiceProvider
        );
        assert_eq!(resolver.binding_scope(DocType::Marketing), BindingScope::Manager);
        assert_eq!(resolver.binding_scope(DocType::Other), BindingScope::Fund);
    }

    #[test]
    fn jurisdiction_from_container_and_path() {
        let resolver = AuthorityResolver::default();
        assert_eq!(
            resolver.infer_jurisdiction("regulatory-cima", "rules/aml.pdf", DocType::Regulatory),
            Some("Cayman Islands".to_string())
        );
        assert_eq!(
            resolver.infer_jurisdiction("fund-governance", "lux/CSSF circular.pdf", DocType::Other),
            Some("Luxembourg".to_string())
        );
        assert_eq!(
            resolver.infer_jurisdiction("deal-pipeline", "memos/aurora.docx", DocType::Other),
            None
        );
    }

    #[test]
    fn full_ruling_composes_all_three() {
        let resolver = AuthorityResolver::default();
        let ruling = resolver.resolve(
            "BINDING",
            DocType::FundConstitution,
            "fund-governance",
            "cayman/lpa.pdf",
        );
        assert_eq!(ruling.resolved_authority, AuthorityTier::Binding);
        assert_eq!(ruling.binding_scope, BindingScope::Fund);
        assert_eq!(ruling.jurisdiction, Some("Cayman Islands".to_string()));
    }

    #[test]
    fn binding_documents_demote_to_internal() {
        let resolver = AuthorityResolver::default();
        assert_eq!(
            resolver.final_shareability(Shareability::InvestorFacing, AuthorityTier::Binding),
            Shareability::Internal
        );
        assert_eq!(
            resolver.final_shareability(Shareability::InvestorFacing, AuthorityTier::Narrative),
            Shareability::InvestorFacing
        );
    }
}
