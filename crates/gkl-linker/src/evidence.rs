//! Obligation-evidence mapping
//!
//! Scores each obligation's significant terms against every
//! evidence-container document and records the best match as the
//! obligation's satisfaction status. A Satisfies link is only written
//! when the best document's tier actually permits it.

use crate::linker::CrossContainerLinker;
use crate::matrix;
use chrono::{DateTime, Utc};
use gkl_domain::text::{normalize, significant_words};
use gkl_domain::{
    DocumentRegistryEntry, FundSnapshot, LinkKey, LinkType, ObligationEvidenceMap,
    ObligationRegisterEntry, SatisfactionStatus,
};
use gkl_graph::{EntityIndex, GraphStore};
use gkl_profile::DocumentCorpus;
use serde::{Deserialize, Serialize};

/// Significant-term cap per obligation
const EVIDENCE_TERM_WORDS: usize = 12;

/// Term-overlap threshold for a full match
const MATCHED_THRESHOLD: usize = 3;

/// Confidence bands per status
const CONF_MATCHED: f64 = 0.91;
const CONF_PARTIAL: f64 = 0.64;

/// Container table for evidence scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceConfig {
    /// Container whose documents count as evidence
    pub evidence_container: String,
}

impl EvidenceConfig {
    /// Production container table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            evidence_container: "portfolio-evidence".to_string(),
        }
    }
}

/// Outcome of one evidence-mapping pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvidenceStats {
    /// Obligations whose best evidence reached full-match strength
    pub obligations_satisfied: usize,
    /// New Satisfies links created
    pub links_created: usize,
}

/// Scores evidence documents against obligation entities
#[derive(Debug, Clone, Default)]
pub struct ObligationEvidenceMapper {
    config: EvidenceConfig,
}

impl ObligationEvidenceMapper {
    /// Create a mapper
    #[inline]
    #[must_use]
    pub fn new(config: EvidenceConfig) -> Self {
        Self { config }
    }

    /// Score every obligation entity against the evidence corpus
    ///
    /// `corpora` pairs each in-scope document with its assembled corpus;
    /// only entries in the evidence container observed at or before
    /// `as_of` participate.
    #[allow(clippy::too_many_arguments)]
    pub fn map<S: GraphStore>(
        &self,
        snapshot: &FundSnapshot,
        corpora: &[(&DocumentRegistryEntry, DocumentCorpus)],
        index: &EntityIndex,
        linker: &CrossContainerLinker,
        store: &mut S,
        as_of: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> EvidenceStats {
        let evidence_docs: Vec<&(&DocumentRegistryEntry, DocumentCorpus)> = corpora
            .iter()
            .filter(|(entry, _)| {
                entry.container == self.config.evidence_container && entry.observed_at <= as_of
            })
            .collect();

        let mut stats = EvidenceStats::default();

        for obligation_entity in index.obligations() {
            let Some(register_row) = Self::register_row(snapshot, &obligation_entity.canonical_name)
            else {
                // Input absence is a soft no-evidence outcome.
                continue;
            };
            let terms = significant_words(&register_row.obligation_text, EVIDENCE_TERM_WORDS);

            let mut best: Option<(&DocumentRegistryEntry, usize)> = None;
            for (entry, corpus) in evidence_docs.iter().map(|pair| (pair.0, &pair.1)) {
                let score = terms
                    .iter()
                    .filter(|term| corpus.contains_term(term))
                    .count();
                if score > 0 && best.map_or(true, |(_, s)| score > s) {
                    best = Some((entry, score));
                }
            }

            let (status, confidence) = match best {
                Some((_, score)) if score >= MATCHED_THRESHOLD => {
                    (SatisfactionStatus::Matched, CONF_MATCHED)
                }
                Some(_) => (SatisfactionStatus::Partial, CONF_PARTIAL),
                None => (SatisfactionStatus::None, 0.0),
            };
            if status == SatisfactionStatus::Matched {
                stats.obligations_satisfied += 1;
            }

            store.upsert_evidence(ObligationEvidenceMap::new(
                snapshot.fund,
                obligation_entity.id,
                best.map(|(entry, _)| entry.id),
                status,
                confidence,
                now,
            ));

            if let Some((entry, score)) = best {
                let tier = linker.resolve_document_tier(entry);
                if matrix::permits(tier, LinkType::Satisfies) {
                    let snippet = format!(
                        "evidence matched {score} of {} obligation terms",
                        terms.len()
                    );
                    let outcome = store.upsert_link(
                        LinkKey {
                            fund: snapshot.fund,
                            source_document: entry.id,
                            target_entity: obligation_entity.id,
                            link_type: LinkType::Satisfies,
                        },
                        tier,
                        confidence,
                        &snippet,
                        now,
                    );
                    if outcome.is_created() {
                        stats.links_created += 1;
                    }
                }
            }
        }

        tracing::debug!(
            satisfied = stats.obligations_satisfied,
            links = stats.links_created,
            "evidence mapping complete"
        );
        stats
    }

    /// The register row behind an obligation entity's canonical name
    fn register_row<'a>(
        snapshot: &'a FundSnapshot,
        canonical_name: &str,
    ) -> Option<&'a ObligationRegisterEntry> {
        snapshot
            .obligations
            .iter()
            .find(|o| normalize(&o.obligation_id) == canonical_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gkl_domain::FundId;
    use gkl_graph::{EntityIndexBuilder, InMemoryGraphStore};
    use gkl_profile::TextChunk;
    use pretty_assertions::assert_eq;

    const OBLIGATION_TEXT: &str =
        "the fund must deliver audited annual statements to the regulator";

    struct Fixture {
        snapshot: FundSnapshot,
        store: InMemoryGraphStore,
        index: EntityIndex,
    }

    fn fixture() -> Fixture {
        let fund = FundId::new();
        let snapshot = FundSnapshot::new(fund).with_obligation(ObligationRegisterEntry::new(
            fund,
            "OBL-1",
            OBLIGATION_TEXT,
            Utc::now(),
        ));
        let mut store = InMemoryGraphStore::new();
        let index = EntityIndexBuilder::default().build(&snapshot, Utc::now(), &mut store);
        Fixture {
            snapshot,
            store,
            index,
        }
    }

    fn evidence_doc(fund: FundId, body: &str) -> (DocumentRegistryEntry, DocumentCorpus) {
        let entry = DocumentRegistryEntry::new(
            fund,
            "portfolio-evidence",
            "reports/evidence.pdf",
            "Evidence Report",
        );
        let corpus = DocumentCorpus::assemble(&entry, &[TextChunk::new(0, body)]);
        (entry, corpus)
    }

    fn run(fixture: &mut Fixture, docs: &[(DocumentRegistryEntry, DocumentCorpus)]) -> EvidenceStats {
        let corpora: Vec<(&DocumentRegistryEntry, DocumentCorpus)> =
            docs.iter().map(|(e, c)| (e, c.clone())).collect();
        ObligationEvidenceMapper::default().map(
            &fixture.snapshot,
            &corpora,
            &fixture.index,
            &CrossContainerLinker::default(),
            &mut fixture.store,
            Utc::now(),
            Utc::now(),
        )
    }

    #[test]
    fn three_shared_terms_match() {
        let mut fx = fixture();
        let fund = fx.snapshot.fund;
        // Shares "audited", "annual", "statements" (and nothing else
        // significant from the obligation text).
        let docs = vec![evidence_doc(fund, "audited annual statements enclosed")];
        let stats = run(&mut fx, &docs);

        assert_eq!(stats.obligations_satisfied, 1);
        let map = fx.store.evidence_maps().next().unwrap();
        assert_eq!(map.satisfaction_status, SatisfactionStatus::Matched);
        assert_eq!(map.confidence, 0.91);
        assert_eq!(map.evidence_document, Some(docs[0].0.id));

        // Evidence tier permits Satisfies, so the link exists too.
        let satisfies: Vec<_> = fx
            .store
            .links()
            .filter(|l| l.link_type == LinkType::Satisfies)
            .collect();
        assert_eq!(satisfies.len(), 1);
        assert_eq!(satisfies[0].confidence, 0.91);
    }

    #[test]
    fn two_shared_terms_partial() {
        let mut fx = fixture();
        let fund = fx.snapshot.fund;
        let docs = vec![evidence_doc(fund, "audited statements enclosed")];
        let stats = run(&mut fx, &docs);

        assert_eq!(stats.obligations_satisfied, 0);
        let map = fx.store.evidence_maps().next().unwrap();
        assert_eq!(map.satisfaction_status, SatisfactionStatus::Partial);
        assert_eq!(map.confidence, 0.64);
        assert!(map.evidence_document.is_some());
    }

    #[test]
    fn zero_shared_terms_none_with_null_document() {
        let mut fx = fixture();
        let fund = fx.snapshot.fund;
        let docs = vec![evidence_doc(fund, "entirely unrelated content")];
        run(&mut fx, &docs);

        let map = fx.store.evidence_maps().next().unwrap();
        assert_eq!(map.satisfaction_status, SatisfactionStatus::None);
        assert_eq!(map.confidence, 0.0);
        assert_eq!(map.evidence_document, None);
        assert_eq!(
            fx.store
                .links()
                .filter(|l| l.link_type == LinkType::Satisfies)
                .count(),
            0
        );
    }

    #[test]
    fn best_scoring_document_wins() {
        let mut fx = fixture();
        let fund = fx.snapshot.fund;
        let docs = vec![
            evidence_doc(fund, "audited statements"),
            evidence_doc(fund, "audited annual statements to the regulator"),
        ];
        run(&mut fx, &docs);

        let map = fx.store.evidence_maps().next().unwrap();
        assert_eq!(map.evidence_document, Some(docs[1].0.id));
        assert_eq!(map.satisfaction_status, SatisfactionStatus::Matched);
    }

    #[test]
    fn non_evidence_container_documents_are_ignored() {
        let mut fx = fixture();
        let fund = fx.snapshot.fund;
        let entry = DocumentRegistryEntry::new(fund, "fund-governance", "gov/c.pdf", "Constitution");
        let corpus = DocumentCorpus::assemble(
            &entry,
            &[TextChunk::new(0, "audited annual statements regulator")],
        );
        let docs = vec![(entry, corpus)];
        run(&mut fx, &docs);

        let map = fx.store.evidence_maps().next().unwrap();
        assert_eq!(map.satisfaction_status, SatisfactionStatus::None);
    }

    #[test]
    fn as_of_excludes_future_evidence() {
        let mut fx = fixture();
        let fund = fx.snapshot.fund;
        let (entry, corpus) = evidence_doc(fund, "audited annual statements enclosed");
        let entry = entry.with_observed_at(Utc::now() + chrono::Duration::days(30));
        let corpora: Vec<(&DocumentRegistryEntry, DocumentCorpus)> = vec![(&entry, corpus)];
        ObligationEvidenceMapper::default().map(
            &fx.snapshot,
            &corpora,
            &fx.index,
            &CrossContainerLinker::default(),
            &mut fx.store,
            Utc::now(),
            Utc::now(),
        );
        let map = fx.store.evidence_maps().next().unwrap();
        assert_eq!(map.satisfaction_status, SatisfactionStatus::None);
    }

    #[test]
    fn rescoring_upserts_one_row_per_obligation() {
        let mut fx = fixture();
        let fund = fx.snapshot.fund;
        let docs = vec![evidence_doc(fund, "audited annual statements enclosed")];
        run(&mut fx, &docs);
        run(&mut fx, &docs);

        assert_eq!(fx.store.evidence_maps().count(), 1);
        assert_eq!(
            fx.store
                .links()
                .filter(|l| l.link_type == LinkType::Satisfies)
                .count(),
            1
        );
    }
}
