//! Document classification
//!
//! An ordered decision list over container, filename, and content
//! signals. Branch order is part of the public contract: reordering is
//! a visible, reviewable change:
//!
//! 1. regulatory markers → Regulatory (95)
//! 2. constitutional markers → FundConstitution (93)
//! 3. service-provider / contract markers (+ content check) → ServiceProviderContract (90)
//! 4. pipeline container + memo content → InvestmentMemo (88)
//! 5. investor-facing container + marketing filename → Marketing (86)
//! 6. risk-policy markers → RiskPolicy (90)
//! 7. audit / portfolio-monitoring markers → AuditReport (84)
//! 8. investor-facing container fallback → InvestorNarrative (82)
//! 9. default → Other (60)
//!
//! Confidence values are fixed bands reflecting signal strength, never
//! inferred from data. Classification never fails: empty or unreadable
//! text degrades to path-only heuristics.

use gkl_domain::{ClassificationBasis, DocType, SignalSource};
use serde::{Deserialize, Serialize};

const CONF_REGULATORY: u8 = 95;
const CONF_CONSTITUTIONAL: u8 = 93;
const CONF_SERVICE_PROVIDER: u8 = 90;
const CONF_MEMO: u8 = 88;
const CONF_MARKETING: u8 = 86;
const CONF_RISK_POLICY: u8 = 90;
const CONF_AUDIT: u8 = 84;
const CONF_NARRATIVE: u8 = 82;
const CONF_DEFAULT: u8 = 60;

/// Keyword and container tables for the decision list
///
/// Defaults carry the production marker sets; tests may override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Regulatory markers (filename or content)
    pub regulatory_markers: Vec<String>,
    /// Constitutional-instrument markers (filename or content)
    pub constitutional_markers: Vec<String>,
    /// Service-provider agreement markers (filename)
    pub provider_markers: Vec<String>,
    /// Secondary content markers raising the provider basis
    pub provider_content_markers: Vec<String>,
    /// Memo content markers (pipeline containers only)
    pub memo_content_markers: Vec<String>,
    /// Marketing filename markers (investor-facing containers only)
    pub marketing_filename_markers: Vec<String>,
    /// Risk-policy markers (filename or content)
    pub risk_policy_markers: Vec<String>,
    /// Audit / portfolio-monitoring markers (filename or content)
    pub audit_markers: Vec<String>,
    /// Containers treated as deal pipeline
    pub pipeline_containers: Vec<String>,
    /// Containers treated as investor-facing
    pub investor_containers: Vec<String>,
}

impl ClassifierConfig {
    /// Production marker tables
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| (*s).to_string()).collect()
        }
        Self {
            regulatory_markers: strings(&[
                "cima", "rulebook", "regulation", "regulatory", "aml", "circular", "statutory",
            ]),
            constitutional_markers: strings(&[
                "constitution",
                "limited partnership agreement",
                "memorandum and articles",
                "articles of association",
                "bylaws",
                "lpa",
            ]),
            provider_markers: strings(&[
                "administration agreement",
                "custody agreement",
                "services agreement",
                "engagement letter",
            ]),
            provider_content_markers: strings(&["the parties agree", "this agreement"]),
            memo_content_markers: strings(&[
                "investment memo",
                "deal memo",
                "investment committee",
                "investment thesis",
            ]),
            marketing_filename_markers: strings(&["deck", "presentation", "teaser", "overview"]),
            risk_policy_markers: strings(&["risk policy", "risk management policy", "limits policy"]),
            audit_markers: strings(&[
                "audit",
                "audited financial statements",
                "portfolio report",
                "valuation report",
            ]),
            pipeline_containers: strings(&["deal-pipeline", "pipeline"]),
            investor_containers: strings(&["investor-materials", "investor-reporting"]),
        }
    }
}

/// Outcome of one classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierVerdict {
    /// Detected institutional type
    pub doc_type: DocType,
    /// Fixed-band confidence, 0–100
    pub confidence: u8,
    /// Contributing signal categories
    pub basis: ClassificationBasis,
}

/// Lowercased signal views over one document
struct Signals {
    container: String,
    filename: String,
    content: String,
    is_pipeline: bool,
    is_investor: bool,
}

/// Ordered first-match-wins document classifier
#[derive(Debug, Clone, Default)]
pub struct DocumentClassifier {
    config: ClassifierConfig,
}

impl DocumentClassifier {
    /// Create a classifier with the production tables
    #[inline]
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify one document
    ///
    /// Total: any input, including empty text, produces a verdict.
    #[must_use]
    pub fn classify(
        &self,
        container: &str,
        filename: &str,
        domain_tag: Option<&str>,
        text: &str,
    ) -> ClassifierVerdict {
        let signals = self.scan(container, filename, domain_tag, text);

        // Ordered decision list; first matching branch wins.
        let branches: &[fn(&Self, &Signals) -> Option<ClassifierVerdict>] = &[
            Self::regulatory_branch,
            Self::constitutional_branch,
            Self::provider_branch,
            Self::memo_branch,
            Self::marketing_branch,
            Self::risk_policy_branch,
            Self::audit_branch,
            Self::narrative_branch,
        ];
        for branch in branches {
            if let Some(verdict) = branch(self, &signals) {
                tracing::debug!(
                    doc_type = %verdict.doc_type,
                    confidence = verdict.confidence,
                    basis = %verdict.basis,
                    "document classified"
                );
                return verdict;
            }
        }
        ClassifierVerdict {
            doc_type: DocType::Other,
            confidence: CONF_DEFAULT,
            basis: ClassificationBasis::from_signals(&[SignalSource::Container]),
        }
    }

    fn scan(
        &self,
        container: &str,
        filename: &str,
        domain_tag: Option<&str>,
        text: &str,
    ) -> Signals {
        let container_lower = container.to_lowercase();
        let tag_lower = domain_tag.unwrap_or("").to_lowercase();
        let container_scope = format!("{container_lower} {tag_lower}");
        Signals {
            is_pipeline: self
                .config
                .pipeline_containers
                .iter()
                .any(|c| container_scope.contains(c.as_str())),
            is_investor: self
                .config
                .investor_containers
                .iter()
                .any(|c| container_scope.contains(c.as_str())),
            container: container_lower,
            filename: filename.to_lowercase(),
            content: text.to_lowercase(),
        }
    }

    /// Which of filename/content carry one of `markers`
    fn marker_basis(signals: &Signals, markers: &[String]) -> Option<ClassificationBasis> {
        let mut basis = ClassificationBasis::new();
        if markers.iter().any(|m| signals.filename.contains(m.as_str())) {
            basis.record(SignalSource::Filename);
        }
        if !signals.content.is_empty()
            && markers.iter().any(|m| signals.content.contains(m.as_str()))
        {
            basis.record(SignalSource::Content);
        }
        if basis.is_empty() {
            None
        } else {
            Some(basis)
        }
    }

    fn regulatory_branch(&self, signals: &Signals) -> Option<ClassifierVerdict> {
        let mut basis = Self::marker_basis(signals, &self.config.regulatory_markers)?;
        if self
            .config
            .regulatory_markers
            .iter()
            .any(|m| signals.container.contains(m.as_str()))
        {
            basis.record(SignalSource::Container);
        }
        Some(ClassifierVerdict {
            doc_type: DocType::Regulatory,
            confidence: CONF_REGULATORY,
            basis,
        })
    }

    fn constitutional_branch(&self, signals: &Signals) -> Option<ClassifierVerdict> {
        let basis = Self::marker_basis(signals, &self.config.constitutional_markers)?;
        Some(ClassifierVerdict {
            doc_type: DocType::FundConstitution,
            confidence: CONF_CONSTITUTIONAL,
            basis,
        })
    }

    fn provider_branch(&self, signals: &Signals) -> Option<ClassifierVerdict> {
        let mut basis = Self::marker_basis(signals, &self.config.provider_markers)?;
        // Secondary content check raises the evidence basis.
        if self
            .config
            .provider_content_markers
            .iter()
            .any(|m| signals.content.contains(m.as_str()))
        {
            basis.record(SignalSource::Content);
        }
        Some(ClassifierVerdict {
            doc_type: DocType::ServiceProviderContract,
            confidence: CONF_SERVICE_PROVIDER,
            basis,
        })
    }

    fn memo_branch(&self, signals: &Signals) -> Option<ClassifierVerdict> {
        if !signals.is_pipeline {
            return None;
        }
        if !self
            .config
            .memo_content_markers
            .iter()
            .any(|m| signals.content.contains(m.as_str()))
        {
            return None;
        }
        Some(ClassifierVerdict {
            doc_type: DocType::InvestmentMemo,
            confidence: CONF_MEMO,
            basis: ClassificationBasis::from_signals(&[
                SignalSource::Container,
                SignalSource::Content,
            ]),
        })
    }

    fn marketing_branch(&self, signals: &Signals) -> Option<ClassifierVerdict> {
        if !signals.is_investor {
            return None;
        }
        if !self
            .config
            .marketing_filename_markers
            .iter()
            .any(|m| signals.filename.contains(m.as_str()))
        {
            return None;
        }
        Some(ClassifierVerdict {
            doc_type: DocType::Marketing,
            confidence: CONF_MARKETING,
            basis: ClassificationBasis::from_signals(&[
                SignalSource::Container,
                SignalSource::Filename,
            ]),
        })
    }

    fn risk_policy_branch(&self, signals: &Signals) -> Option<ClassifierVerdict> {
        let basis = Self::marker_basis(signals, &self.config.risk_policy_markers)?;
        Some(ClassifierVerdict {
            doc_type: DocType::RiskPolicy,
            confidence: CONF_RISK_POLICY,
            basis,
        })
    }

    fn audit_branch(&self, signals: &Signals) -> Option<ClassifierVerdict> {
        let basis = Self::marker_basis(signals, &self.config.audit_markers)?;
        Some(ClassifierVerdict {
            doc_type: DocType::AuditReport,
            confidence: CONF_AUDIT,
            basis,
        })
    }

    fn narrative_branch(&self, signals: &Signals) -> Option<ClassifierVerdict> {
        if !signals.is_investor {
            return None;
        }
        Some(ClassifierVerdict {
            doc_type: DocType::InvestorNarrative,
            confidence: CONF_NARRATIVE,
            basis: ClassificationBasis::from_signals(&[SignalSource::Container]),
        })
    }
}
