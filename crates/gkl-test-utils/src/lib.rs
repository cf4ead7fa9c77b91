//! Testing utilities for the GKL workspace
//!
//! Shared fixtures, a canned corpus provider, and tracing setup.

#![allow(missing_docs)]

use chrono::Utc;
use gkl_domain::{
    DealRecord, DocumentId, DocumentRegistryEntry, FundId, FundSnapshot, ManagerProfile,
    ObligationRegisterEntry, Shareability,
};
use gkl_profile::{AnchorConfig, CorpusProvider, ExtractionError, TextChunk};
use indexmap::{IndexMap, IndexSet};

/// Corpus provider backed by canned per-document text
#[derive(Debug, Default)]
pub struct StaticCorpusProvider {
    texts: IndexMap<DocumentId, String>,
    failing: IndexSet<DocumentId>,
}

impl StaticCorpusProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` as a single chunk for `document`
    #[must_use]
    pub fn with_text(mut self, document: DocumentId, text: impl Into<String>) -> Self {
        self.texts.insert(document, text.into());
        self
    }

    /// Fail retrieval for `document`, exercising the degraded-text path
    #[must_use]
    pub fn with_failure(mut self, document: DocumentId) -> Self {
        self.failing.insert(document);
        self
    }
}

impl CorpusProvider for StaticCorpusProvider {
    fn chunks(&self, entry: &DocumentRegistryEntry) -> Result<Vec<TextChunk>, ExtractionError> {
        if self.failing.contains(&entry.id) {
            return Err(ExtractionError::unavailable(&entry.blob_path, "canned failure"));
        }
        Ok(self
            .texts
            .get(&entry.id)
            .map(|text| vec![TextChunk::new(0, text.clone())])
            .unwrap_or_default())
    }
}

/// Anchor tables for the fixture fund's brand
#[must_use]
pub fn fixture_anchor_config() -> AnchorConfig {
    AnchorConfig::new().with_fund_brand_markers(vec!["meridian".to_string()])
}

/// The reference end-to-end scenario
///
/// One fund with a narrative investor deck, two binding instruments
/// carrying duplicate obligations with divergent due rules, an
/// intelligence pipeline memo, and an evidence portfolio report.
pub struct ScenarioFixture {
    pub snapshot: FundSnapshot,
    pub provider: StaticCorpusProvider,
    pub deck: DocumentId,
    pub constitution: DocumentId,
    pub rulebook: DocumentId,
    pub memo: DocumentId,
    pub portfolio: DocumentId,
}

pub const FILING_OBLIGATION_TEXT: &str =
    "The fund must file audited financial statements with the regulator";

#[must_use]
pub fn governance_scenario() -> ScenarioFixture {
    let fund = FundId::new();
    let now = Utc::now();

    let deck = DocumentRegistryEntry::new(
        fund,
        "investor-materials",
        "decks/Fund III Teaser Deck.pptx",
        "Fund III Teaser Deck",
    )
    .with_authority_tag("NARRATIVE")
    .with_shareability(Shareability::InvestorFacing);
    let constitution = DocumentRegistryEntry::new(
        fund,
        "fund-governance",
        "cayman/Fund III Constitution.pdf",
        "Fund III Constitution",
    )
    .with_authority_tag("BINDING");
    let rulebook = DocumentRegistryEntry::new(
        fund,
        "regulatory-library",
        "rules/CIMA Rulebook.pdf",
        "CIMA Rulebook",
    )
    .with_authority_tag("BINDING");
    let memo = DocumentRegistryEntry::new(
        fund,
        "deal-pipeline",
        "memos/Aurora IC Memo.docx",
        "Aurora IC Memo",
    )
    .with_authority_tag("INTELLIGENCE");
    let portfolio = DocumentRegistryEntry::new(
        fund,
        "portfolio-evidence",
        "reports/Q3 Portfolio Report.pdf",
        "Q3 Portfolio Report",
    )
    .with_authority_tag("EVIDENCE");

    let ids = ScenarioIds {
        deck: deck.id,
        constitution: constitution.id,
        rulebook: rulebook.id,
        memo: memo.id,
        portfolio: portfolio.id,
    };

    let provider = StaticCorpusProvider::new()
        .with_text(
            ids.deck,
            "The Meridian Credit Fund III, managed by Meridian Capital, invests in \
             opportunities such as Project Aurora. The fund must file audited financial \
             statements with the regulator.",
        )
        .with_text(
            ids.constitution,
            "This constitution is governed by the laws of the Cayman Islands. The fund \
             must file audited financial statements with the regulator within 30 days \
             after quarter end. Managed by Meridian Capital. Effective 2024-06-30.",
        )
        .with_text(
            ids.rulebook,
            "CIMA regulation, Section 41: the fund must file audited financial \
             statements with the regulator within 45 days after quarter end.",
        )
        .with_text(
            ids.memo,
            "Investment memo: Project Aurora, sponsored by Northgate Partners. The \
             audited financial statements requirement was noted by Meridian Capital.",
        )
        .with_text(
            ids.portfolio,
            "Q3 portfolio valuation. Audited financial statements for the fund are \
             enclosed with this report, as filed with the regulator.",
        );

    let snapshot = FundSnapshot::new(fund)
        .with_manager(ManagerProfile::new(fund, "Meridian Capital", now))
        .with_deal(DealRecord::new(fund, "Project Aurora", now).with_sponsor("Northgate Partners"))
        .with_obligation(
            ObligationRegisterEntry::new(fund, "OBL-1", FILING_OBLIGATION_TEXT, now)
                .with_due_rule("within 30 days after quarter end")
                .with_frequency("quarterly")
                .with_source_document(ids.constitution),
        )
        .with_obligation(
            ObligationRegisterEntry::new(fund, "OBL-2", FILING_OBLIGATION_TEXT, now)
                .with_due_rule("within 45 days after quarter end")
                .with_frequency("quarterly")
                .with_source_document(ids.rulebook),
        )
        .with_document(deck)
        .with_document(constitution)
        .with_document(rulebook)
        .with_document(memo)
        .with_document(portfolio);

    ScenarioFixture {
        snapshot,
        provider,
        deck: ids.deck,
        constitution: ids.constitution,
        rulebook: ids.rulebook,
        memo: ids.memo,
        portfolio: ids.portfolio,
    }
}

struct ScenarioIds {
    deck: DocumentId,
    constitution: DocumentId,
    rulebook: DocumentId,
    memo: DocumentId,
    portfolio: DocumentId,
}

/// Install a test tracing subscriber (no-op if already set)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
