//! Knowledge anchor extraction
//!
//! Pulls typed fact anchors out of raw document text: effective dates,
//! governing-law clauses, section references, provider roles, obligation
//! keywords. Anchors are a replace-on-extract cache: the store deletes a
//! document's anchors before inserting the fresh set, so reruns never
//! accumulate stale duplicates.

use gkl_domain::text::clip_snippet;
use gkl_domain::{AnchorType, DocType, DocumentId, FundId, KnowledgeAnchor};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Hard cap on anchors per document
pub(crate) const MAX_ANCHORS: usize = 40;

/// Snippet clip length for evidentiary traceability
pub(crate) const SNIPPET_LEN: usize = 450;

/// Governing-law clause value clip length
const LAW_CLIP: usize = 120;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})[-/](\d{2})[-/](\d{2})\b").expect("date regex"));

static LAW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)governed by the laws? of\s+([^.;\r\n]+)").expect("governing-law regex")
});

static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:section|sec\.)\s+(\d+[a-z0-9.()\-]*)").expect("section regex")
});

/// Marker tables for anchor extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Fund brand markers; a FundName anchor needs one of these plus the
    /// word "fund" in the text
    pub fund_brand_markers: Vec<String>,
    /// Provider role keywords
    pub provider_roles: Vec<String>,
    /// Obligation keywords
    pub obligation_keywords: Vec<String>,
}

impl AnchorConfig {
    /// Production tables (brand markers are fund-specific and start empty)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the fund brand markers
    #[inline]
    #[must_use]
    pub fn with_fund_brand_markers(mut self, markers: Vec<String>) -> Self {
        self.fund_brand_markers = markers;
        self
    }
}

impl Default for AnchorConfig {
    fn default() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| (*s).to_string()).collect()
        }
        Self {
            fund_brand_markers: Vec::new(),
            provider_roles: strings(&["administrator", "custodian", "counsel", "service provider"]),
            obligation_keywords: strings(&["must", "shall", "required", "requirement"]),
        }
    }
}

/// Extracts typed fact anchors from document text
#[derive(Debug, Clone, Default)]
pub struct AnchorExtractor {
    config: AnchorConfig,
}

impl AnchorExtractor {
    /// Create an extractor
    #[inline]
    #[must_use]
    pub fn new(config: AnchorConfig) -> Self {
        Self { config }
    }

    /// Extract all anchors for one document (cap 40)
    ///
    /// Total: empty text yields the single DocTypeFallback anchor, so
    /// every document always has at least one knowledge anchor.
    #[must_use]
    pub fn extract(
        &self,
        fund: FundId,
        document: DocumentId,
        text: &str,
        doc_type: DocType,
    ) -> Vec<KnowledgeAnchor> {
        let mut anchors = Vec::new();
        let lower = text.to_lowercase();

        self.extract_fund_name(fund, document, text, &lower, &mut anchors);
        self.extract_provider_names(fund, document, text, &lower, &mut anchors);
        Self::extract_dates(fund, document, text, &mut anchors);
        Self::extract_governing_law(fund, document, text, &mut anchors);
        Self::extract_section_refs(fund, document, text, &mut anchors);
        self.extract_obligation_keywords(fund, document, text, &lower, &mut anchors);

        if anchors.is_empty() {
            anchors.push(KnowledgeAnchor::new(
                fund,
                document,
                AnchorType::DocTypeFallback,
                doc_type.label(),
                clip_snippet(text, SNIPPET_LEN),
            ));
        }
        anchors.truncate(MAX_ANCHORS);
        tracing::debug!(document = %document, count = anchors.len(), "anchors extracted");
        anchors
    }

    /// Snippet starting at the match position
    ///
    /// Offsets found in the lowercased view may not align with the
    /// original text for case-folding multi-byte characters; fall back to
    /// the start of the text in that case.
    fn snippet_at(text: &str, byte_idx: usize) -> String {
        clip_snippet(text.get(byte_idx..).unwrap_or(text), SNIPPET_LEN)
    }

    fn extract_fund_name(
        &self,
        fund: FundId,
        document: DocumentId,
        text: &str,
        lower: &str,
        anchors: &mut Vec<KnowledgeAnchor>,
    ) {
        if !lower.contains("fund") {
            return;
        }
        let Some(marker) = self
            .config
            .fund_brand_markers
            .iter()
            .find(|m| lower.contains(m.as_str()))
        else {
            return;
        };
        let idx = lower.find(marker.as_str()).unwrap_or(0);
        anchors.push(KnowledgeAnchor::new(
            fund,
            document,
            AnchorType::FundName,
            marker.clone(),
            Self::snippet_at(text, idx),
        ));
    }

    fn extract_provider_names(
        &self,
        fund: FundId,
        document: DocumentId,
        text: &str,
        lower: &str,
        anchors: &mut Vec<KnowledgeAnchor>,
    ) {
        for role in &self.config.provider_roles {
            if let Some(idx) = lower.find(role.as_str()) {
                anchors.push(KnowledgeAnchor::new(
                    fund,
                    document,
                    AnchorType::ProviderName,
                    role.clone(),
                    Self::snippet_at(text, idx),
                ));
            }
        }
    }

    fn extract_dates(
        fund: FundId,
        document: DocumentId,
        text: &str,
        anchors: &mut Vec<KnowledgeAnchor>,
    ) {
        // Every occurrence counts; no dedup across repeats.
        for caps in DATE_RE.captures_iter(text) {
            let whole = caps.get(0).expect("regex group 0");
            let value = format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);
            anchors.push(KnowledgeAnchor::new(
                fund,
                document,
                AnchorType::EffectiveDate,
                value,
                Self::snippet_at(text, whole.start()),
            ));
        }
    }

    fn extract_governing_law(
        fund: FundId,
        document: DocumentId,
        text: &str,
        anchors: &mut Vec<KnowledgeAnchor>,
    ) {
        // First clause only.
        if let Some(caps) = LAW_RE.captures(text) {
            let whole = caps.get(0).expect("regex group 0");
            let value = clip_snippet(caps[1].trim(), LAW_CLIP);
            anchors.push(KnowledgeAnchor::new(
                fund,
                document,
                AnchorType::GoverningLaw,
                value,
                Self::snippet_at(text, whole.start()),
            ));
        }
    }

    fn extract_section_refs(
        fund: FundId,
        document: DocumentId,
        text: &str,
        anchors: &mut Vec<KnowledgeAnchor>,
    ) {
        for caps in SECTION_RE.captures_iter(text) {
            let whole = caps.get(0).expect("regex group 0");
            anchors.push(KnowledgeAnchor::new(
                fund,
                document,
                AnchorType::RegulatoryReference,
                caps[1].to_string(),
                Self::snippet_at(text, whole.start()),
            ));
        }
    }

    fn extract_obligation_keywords(
        &self,
        fund: FundId,
        document: DocumentId,
        text: &str,
        lower: &str,
        anchors: &mut Vec<KnowledgeAnchor>,
    ) {
        for keyword in &self.config.obligation_keywords {
            if let Some(idx) = lower.find(keyword.as_str()) {
                anchors.push(KnowledgeAnchor::new(
                    fund,
                    document,
                    AnchorType::ObligationKeyword,
                    keyword.clone(),
                    Self::snippet_at(text, idx),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extractor() -> AnchorExtractor {
        AnchorExtractor::new(
            AnchorConfig::new().with_fund_brand_markers(vec!["meridian".to_string()]),
        )
    }

    fn extract(text: &str) -> Vec<KnowledgeAnchor> {
        extractor().extract(FundId::new(), DocumentId::new(), text, DocType::Other)
    }

    fn of_type(anchors: &[KnowledgeAnchor], anchor_type: AnchorType) -> Vec<&KnowledgeAnchor> {
        anchors.iter().filter(|a| a.anchor_type == anchor_type).collect()
    }

    #[test]
    fn fund_name_needs_brand_and_fund_word() {
        let both = extract("the Meridian Credit Fund III");
        assert_eq!(of_type(&both, AnchorType::FundName).len(), 1);
        assert_eq!(of_type(&both, AnchorType::FundName)[0].value, "meridian");

        let brand_only = extract("Meridian holdings overview");
        assert!(of_type(&brand_only, AnchorType::FundName).is_empty());

        let fund_only = extract("an unrelated fund");
        assert!(of_type(&fund_only, AnchorType::FundName).is_empty());
    }

    #[test]
    fn provider_roles_once_each() {
        let anchors = extract(
            "the administrator and the custodian, and again the administrator",
        );
        let providers = of_type(&anchors, AnchorType::ProviderName);
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].value, "administrator");
        assert_eq!(providers[1].value, "custodian");
    }

    #[test]
    fn every_date_occurrence_counts() {
        let anchors = extract("effective 2025-01-01, amended 2025/06/30, restated 2025-01-01");
        let dates = of_type(&anchors, AnchorType::EffectiveDate);
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0].value, "2025-01-01");
        assert_eq!(dates[1].value, "2025-06-30"); // slashes normalized
        assert_eq!(dates[2].value, "2025-01-01");
    }

    #[test]
    fn governing_law_first_match_clipped() {
        let anchors = extract(
            "This deed is governed by the laws of the Cayman Islands. \
             The side letter is governed by the law of England.",
        );
        let law = of_type(&anchors, AnchorType::GoverningLaw);
        assert_eq!(law.len(), 1);
        assert_eq!(law[0].value, "the Cayman Islands");
    }

    #[test]
    fn governing_law_value_clips_to_120() {
        let long_jurisdiction = "x".repeat(200);
        let anchors = extract(&format!("governed by the laws of {long_jurisdiction}"));
        let law = of_type(&anchors, AnchorType::GoverningLaw);
        assert_eq!(law[0].value.chars().count(), 121); // 120 + ellipsis
    }

    #[test]
    fn section_references_per_match() {
        let anchors = extract("per Section 4(1) and sec. 12b of the rules");
        let refs = of_type(&anchors, AnchorType::RegulatoryReference);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].value, "4(1)");
        assert_eq!(refs[1].value, "12b");
    }

    #[test]
    fn obligation_keywords_distinct() {
        let anchors = extract("the manager must report; reports shall be required");
        let keywords: Vec<_> = of_type(&anchors, AnchorType::ObligationKeyword)
            .iter()
            .map(|a| a.value.clone())
            .collect();
        assert_eq!(keywords, vec!["must", "shall", "required"]);
    }

    #[test]
    fn empty_text_gets_doc_type_fallback() {
        let anchors = extractor().extract(
            FundId::new(),
            DocumentId::new(),
            "",
            DocType::AuditReport,
        );
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].anchor_type, AnchorType::DocTypeFallback);
        assert_eq!(anchors[0].value, "audit_report");
    }

    #[test]
    fn anchor_cap_at_forty() {
        let many_dates = (0..60)
            .map(|i| format!("2025-01-{:02}", (i % 28) + 1))
            .collect::<Vec<_>>()
            .join(" ");
        let anchors = extract(&many_dates);
        assert_eq!(anchors.len(), 40);
    }

    #[test]
    fn snippets_are_clipped() {
        let text = format!("must {}", "y".repeat(600));
        let anchors = extract(&text);
        for anchor in &anchors {
            assert!(anchor.snippet.chars().count() <= SNIPPET_LEN + 1);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Extraction is total and always yields at least one anchor.
            #[test]
            fn extract_is_total(text in ".{0,600}") {
                let anchors = extract(&text);
                prop_assert!(!anchors.is_empty());
                prop_assert!(anchors.len() <= MAX_ANCHORS);
            }
        }
    }
}
