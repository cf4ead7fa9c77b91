//! Institutional document types
//!
//! Closed enumeration of the document types the classifier can assign.

use serde::{Deserialize, Serialize};

/// Institutional document type detected by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    /// Regulatory rulebooks, circulars, and filings
    Regulatory,
    /// Fund constitutional instruments (LPA, M&A, bylaws)
    FundConstitution,
    /// Executed service-provider contracts
    ServiceProviderContract,
    /// Pipeline investment memos
    InvestmentMemo,
    /// Marketing decks and teasers
    Marketing,
    /// Internal risk policies
    RiskPolicy,
    /// Audit and portfolio-monitoring reports
    AuditReport,
    /// Investor-facing narrative material
    InvestorNarrative,
    /// Anything the decision list could not place
    Other,
}

impl DocType {
    /// Lowercase label used in jurisdiction scans and logging
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DocType::Regulatory => "regulatory",
            DocType::FundConstitution => "fund_constitution",
            DocType::ServiceProviderContract => "service_provider_contract",
            DocType::InvestmentMemo => "investment_memo",
            DocType::Marketing => "marketing",
            DocType::RiskPolicy => "risk_policy",
            DocType::AuditReport => "audit_report",
            DocType::InvestorNarrative => "investor_narrative",
            DocType::Other => "other",
        }
    }

    /// All variants, in classifier priority order
    #[must_use]
    pub fn all() -> &'static [DocType] {
        &[
            DocType::Regulatory,
            DocType::FundConstitution,
            DocType::ServiceProviderContract,
            DocType::InvestmentMemo,
            DocType::Marketing,
            DocType::RiskPolicy,
            DocType::AuditReport,
            DocType::InvestorNarrative,
            DocType::Other,
        ]
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
