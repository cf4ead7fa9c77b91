//! Binding-obligation conflict detection
//!
//! Groups obligation register rows by an 8-word normalized-text key and
//! flags groups whose due rules diverge. ConflictsWith links are only
//! asserted for rows whose source document resolves to Binding or Policy
//! authority; lower tiers and unresolvable sources still count toward
//! the detected total but are silently excluded from linking.

use crate::linker::CrossContainerLinker;
use chrono::{DateTime, Utc};
use gkl_domain::text::{normalize, significant_words};
use gkl_domain::{
    DocumentRegistryEntry, FundSnapshot, LinkKey, LinkType, ObligationRegisterEntry,
};
use gkl_graph::{EntityIndex, GraphStore};
use indexmap::IndexMap;

/// Words folded into the grouping key
const GROUP_KEY_WORDS: usize = 8;

/// Fixed confidence for conflict links
const CONF_CONFLICT: f64 = 0.95;

/// Due rule assumed when a register row leaves it unset
const DEFAULT_DUE_RULE: &str = "ongoing";

/// Outcome of one conflict-detection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictStats {
    /// Register rows belonging to a conflicting group
    pub conflicts_detected: usize,
    /// New ConflictsWith links created
    pub links_created: usize,
}

/// Detects divergent due rules among duplicate obligations
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector;

impl ConflictDetector {
    /// Create a detector
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Detect conflicts across the obligation register
    ///
    /// Existing ConflictsWith links for the fund are invalidated first
    /// (the only link deletion the engine ever performs), so resolved
    /// conflicts disappear on the next run instead of lingering.
    pub fn detect<S: GraphStore>(
        &self,
        snapshot: &FundSnapshot,
        index: &EntityIndex,
        linker: &CrossContainerLinker,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> ConflictStats {
        let invalidated = store.invalidate_links(snapshot.fund, LinkType::ConflictsWith);
        if invalidated > 0 {
            tracing::debug!(invalidated, "stale conflict links invalidated");
        }

        let mut groups: IndexMap<String, Vec<&ObligationRegisterEntry>> = IndexMap::new();
        for row in &snapshot.obligations {
            let key = significant_words(&row.obligation_text, GROUP_KEY_WORDS).join(" ");
            if key.is_empty() {
                continue;
            }
            groups.entry(key).or_default().push(row);
        }

        let mut stats = ConflictStats::default();
        for (key, rows) in &groups {
            if rows.len() < 2 {
                continue;
            }
            let due_rules: Vec<String> = rows
                .iter()
                .map(|r| normalize(r.due_rule.as_deref().unwrap_or(DEFAULT_DUE_RULE)))
                .collect();
            let mut distinct = due_rules.clone();
            distinct.sort();
            distinct.dedup();
            if distinct.len() < 2 {
                continue;
            }

            tracing::debug!(group = %key, rules = distinct.len(), "divergent due rules detected");
            stats.conflicts_detected += rows.len();

            for (&row, due_rule) in rows.iter().zip(&due_rules) {
                let Some(source) = Self::source_document(snapshot, row) else {
                    continue;
                };
                let tier = linker.resolve_document_tier(source);
                if !tier.is_obligation_grade() {
                    continue;
                }
                let Some(entity) =
                    index.obligation_by_canonical(&normalize(&row.obligation_id))
                else {
                    continue;
                };
                let snippet = format!(
                    "due rule '{due_rule}' diverges within duplicate obligation group ({} variants)",
                    distinct.len()
                );
                let outcome = store.upsert_link(
                    LinkKey {
                        fund: snapshot.fund,
                        source_document: source.id,
                        target_entity: entity.id,
                        link_type: LinkType::ConflictsWith,
                    },
                    tier,
                    CONF_CONFLICT,
                    &snippet,
                    now,
                );
                if outcome.is_created() {
                    stats.links_created += 1;
                }
            }
        }

        tracing::debug!(
            conflicts = stats.conflicts_detected,
            links = stats.links_created,
            "conflict detection complete"
        );
        stats
    }

    /// First resolvable source registry document of a register row
    fn source_document<'a>(
        snapshot: &'a FundSnapshot,
        row: &ObligationRegisterEntry,
    ) -> Option<&'a DocumentRegistryEntry> {
        row.source_document_ids
            .iter()
            .find_map(|id| snapshot.documents.iter().find(|d| d.id == *id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gkl_domain::{AuthorityTier, FundId};
    use gkl_graph::{EntityIndexBuilder, InMemoryGraphStore};
    use pretty_assertions::assert_eq;

    const FILING_TEXT: &str =
        "the fund must file audited financial statements with the regulator annually";

    struct Fixture {
        snapshot: FundSnapshot,
        store: InMemoryGraphStore,
    }

    impl Fixture {
        fn detect(&mut self) -> ConflictStats {
            let index =
                EntityIndexBuilder::default().build(&self.snapshot, Utc::now(), &mut self.store);
            ConflictDetector::new().detect(
                &self.snapshot,
                &index,
                &CrossContainerLinker::default(),
                &mut self.store,
                Utc::now(),
            )
        }
    }

    fn duplicate_obligations(container_a: &str, container_b: &str) -> Fixture {
        let fund = FundId::new();
        let doc_a = DocumentRegistryEntry::new(fund, container_a, "a/one.pdf", "Constitution");
        let doc_b = DocumentRegistryEntry::new(fund, container_b, "b/two.pdf", "Rulebook");
        let snapshot = FundSnapshot::new(fund)
            .with_obligation(
                ObligationRegisterEntry::new(fund, "OBL-1", FILING_TEXT, Utc::now())
                    .with_due_rule("within 30 days after quarter end")
                    .with_source_document(doc_a.id),
            )
            .with_obligation(
                ObligationRegisterEntry::new(fund, "OBL-2", FILING_TEXT, Utc::now())
                    .with_due_rule("within 45 days after quarter end")
                    .with_source_document(doc_b.id),
            )
            .with_document(doc_a)
            .with_document(doc_b);
        Fixture {
            snapshot,
            store: InMemoryGraphStore::new(),
        }
    }

    #[test]
    fn divergent_due_rules_conflict() {
        let mut fx = duplicate_obligations("fund-governance", "regulatory-library");
        let stats = fx.detect();

        assert_eq!(stats.conflicts_detected, 2);
        assert_eq!(stats.links_created, 2);
        let conflicts: Vec<_> = fx
            .store
            .links()
            .filter(|l| l.link_type == LinkType::ConflictsWith)
            .collect();
        assert_eq!(conflicts.len(), 2);
        for link in conflicts {
            assert_eq!(link.confidence, 0.95);
            assert!(matches!(
                link.authority_tier,
                AuthorityTier::Binding | AuthorityTier::Policy
            ));
        }
    }

    #[test]
    fn identical_due_rules_do_not_conflict() {
        let fund = FundId::new();
        let doc = DocumentRegistryEntry::new(fund, "fund-governance", "a.pdf", "A");
        let mut fx = Fixture {
            snapshot: FundSnapshot::new(fund)
                .with_obligation(
                    ObligationRegisterEntry::new(fund, "OBL-1", FILING_TEXT, Utc::now())
                        .with_due_rule("Within 30 Days after quarter end")
                        .with_source_document(doc.id),
                )
                .with_obligation(
                    ObligationRegisterEntry::new(fund, "OBL-2", FILING_TEXT, Utc::now())
                        .with_due_rule("within 30 days  after quarter end")
                        .with_source_document(doc.id),
                )
                .with_document(doc),
            store: InMemoryGraphStore::new(),
        };
        let stats = fx.detect();
        // Normalization makes the two rules identical.
        assert_eq!(stats.conflicts_detected, 0);
        assert_eq!(stats.links_created, 0);
    }

    #[test]
    fn unset_due_rule_defaults_to_ongoing() {
        let fund = FundId::new();
        let doc = DocumentRegistryEntry::new(fund, "fund-governance", "a.pdf", "A");
        let mut fx = Fixture {
            snapshot: FundSnapshot::new(fund)
                .with_obligation(
                    ObligationRegisterEntry::new(fund, "OBL-1", FILING_TEXT, Utc::now())
                        .with_source_document(doc.id),
                )
                .with_obligation(
                    ObligationRegisterEntry::new(fund, "OBL-2", FILING_TEXT, Utc::now())
                        .with_due_rule("ongoing")
                        .with_source_document(doc.id),
                )
                .with_document(doc),
            store: InMemoryGraphStore::new(),
        };
        let stats = fx.detect();
        assert_eq!(stats.conflicts_detected, 0);
    }

    #[test]
    fn sub_policy_sources_counted_but_not_linked() {
        // Pipeline memos cannot assert conflicts, but their rows still
        // count toward the detected total.
        let mut fx = duplicate_obligations("deal-pipeline", "portfolio-evidence");
        let stats = fx.detect();

        assert_eq!(stats.conflicts_detected, 2);
        assert_eq!(stats.links_created, 0);
    }

    #[test]
    fn unresolvable_source_counted_but_not_linked() {
        let fund = FundId::new();
        let mut fx = Fixture {
            snapshot: FundSnapshot::new(fund)
                .with_obligation(
                    ObligationRegisterEntry::new(fund, "OBL-1", FILING_TEXT, Utc::now())
                        .with_due_rule("within 30 days"),
                )
                .with_obligation(
                    ObligationRegisterEntry::new(fund, "OBL-2", FILING_TEXT, Utc::now())
                        .with_due_rule("within 45 days"),
                ),
            store: InMemoryGraphStore::new(),
        };
        let stats = fx.detect();
        assert_eq!(stats.conflicts_detected, 2);
        assert_eq!(stats.links_created, 0);
    }

    #[test]
    fn different_obligation_texts_never_group() {
        let fund = FundId::new();
        let doc = DocumentRegistryEntry::new(fund, "fund-governance", "a.pdf", "A");
        let mut fx = Fixture {
            snapshot: FundSnapshot::new(fund)
                .with_obligation(
                    ObligationRegisterEntry::new(fund, "OBL-1", FILING_TEXT, Utc::now())
                        .with_due_rule("within 30 days")
                        .with_source_document(doc.id),
                )
                .with_obligation(
                    ObligationRegisterEntry::new(
                        fund,
                        "OBL-2",
                        "the custodian shall reconcile positions daily",
                        Utc::now(),
                    )
                    .with_due_rule("within 45 days")
                    .with_source_document(doc.id),
                )
                .with_document(doc),
            store: InMemoryGraphStore::new(),
        };
        let stats = fx.detect();
        assert_eq!(stats.conflicts_detected, 0);
    }

    #[test]
    fn redetection_invalidates_before_relinking() {
        let mut fx = duplicate_obligations("fund-governance", "regulatory-library");
        fx.detect();
        let first_count = fx
            .store
            .links()
            .filter(|l| l.link_type == LinkType::ConflictsWith)
            .count();

        let stats = fx.detect();
        let second_count = fx
            .store
            .links()
            .filter(|l| l.link_type == LinkType::ConflictsWith)
            .count();

        assert_eq!(first_count, 2);
        assert_eq!(second_count, 2);
        // Invalidation ran, so the links were re-created fresh.
        assert_eq!(stats.links_created, 2);
    }

    #[test]
    fn empty_grouping_key_rows_are_excluded() {
        let fund = FundId::new();
        let mut fx = Fixture {
            snapshot: FundSnapshot::new(fund)
                .with_obligation(
                    ObligationRegisterEntry::new(fund, "OBL-1", "a b c", Utc::now())
                        .with_due_rule("within 30 days"),
                )
                .with_obligation(
                    ObligationRegisterEntry::new(fund, "OBL-2", "a b c", Utc::now())
                        .with_due_rule("within 45 days"),
                ),
            store: InMemoryGraphStore::new(),
        };
        // All words are under 4 chars, so the grouping key is empty and
        // the rows never group.
        let stats = fx.detect();
        assert_eq!(stats.conflicts_detected, 0);
    }
}
