//! Pipeline orchestration
//!
//! Wires the profiling passes, the entity index, the linker, and the
//! obligation passes into one idempotent run per fund.

use crate::summary::{RunCounts, RunStatus, RunSummary};
use chrono::{DateTime, Utc};
use gkl_domain::{
    DocumentClassification, DocumentGovernanceProfile, DocumentId, DocumentRegistryEntry,
    FundSnapshot,
};
use gkl_graph::{EntityIndexBuilder, GraphStore, IndexConfig};
use gkl_linker::{
    ConflictDetector, CrossContainerLinker, EvidenceConfig, LinkerConfig, ObligationEvidenceMapper,
};
use gkl_profile::{
    AnchorConfig, AnchorExtractor, AuthorityConfig, AuthorityResolver, ClassifierConfig,
    CorpusProvider, DocumentClassifier, DocumentCorpus,
};
use indexmap::IndexSet;

/// Full configuration of one pipeline instance
///
/// Defaults carry the production tables of every component.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Mode label reported in run summaries
    pub mode: Option<String>,
    /// Authority resolution tables
    pub authority: AuthorityConfig,
    /// Classifier marker tables
    pub classifier: ClassifierConfig,
    /// Anchor extraction tables
    pub anchors: AnchorConfig,
    /// Entity index container tables
    pub index: IndexConfig,
    /// Linker container map
    pub linker: LinkerConfig,
    /// Evidence container table
    pub evidence: EvidenceConfig,
}

impl PipelineConfig {
    /// Production configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a mode label
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// With anchor tables
    #[inline]
    #[must_use]
    pub fn with_anchors(mut self, anchors: AnchorConfig) -> Self {
        self.anchors = anchors;
        self
    }
}

const DEFAULT_MODE: &str = "knowledge_linking";

/// The per-fund knowledge-linking pipeline
#[derive(Debug)]
pub struct LinkingPipeline {
    mode: String,
    resolver: AuthorityResolver,
    classifier: DocumentClassifier,
    extractor: AnchorExtractor,
    index_builder: EntityIndexBuilder,
    linker: CrossContainerLinker,
    evidence: ObligationEvidenceMapper,
    conflicts: ConflictDetector,
}

impl LinkingPipeline {
    /// Assemble a pipeline from configuration
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let resolver = AuthorityResolver::new(config.authority);
        Self {
            mode: config.mode.unwrap_or_else(|| DEFAULT_MODE.to_string()),
            linker: CrossContainerLinker::new(config.linker, resolver.clone()),
            resolver,
            classifier: DocumentClassifier::new(config.classifier),
            extractor: AnchorExtractor::new(config.anchors),
            index_builder: EntityIndexBuilder::new(config.index),
            evidence: ObligationEvidenceMapper::new(config.evidence),
            conflicts: ConflictDetector::new(),
        }
    }

    /// Execute one full run over a fund snapshot
    ///
    /// Total: every failure mode inside the run degrades (corpus errors
    /// fall back to title + path text; an empty entity index surfaces as
    /// Block status). Safe to re-run any number of times.
    pub fn run<P: CorpusProvider, S: GraphStore>(
        &self,
        snapshot: &mut FundSnapshot,
        provider: &P,
        store: &mut S,
        as_of: DateTime<Utc>,
    ) -> RunSummary {
        let now = Utc::now();
        tracing::info!(fund = %snapshot.fund, %as_of, mode = %self.mode, "pipeline run started");

        let corpora = self.profile_documents(snapshot, provider, store);
        tracing::info!(documents = corpora.len(), "documents profiled");

        let index = self.index_builder.build(snapshot, as_of, store);
        if index.is_empty() {
            tracing::warn!(fund = %snapshot.fund, "entity index empty, blocking run");
            return RunSummary::new(&self.mode, as_of, RunStatus::Block, RunCounts::default());
        }
        tracing::info!(entities = index.len(), "entity index ready");

        let mut counts = RunCounts::default();
        let mut linked_entities = IndexSet::new();
        for entry in snapshot.active_documents() {
            let Some(corpus) = Self::corpus_for(&corpora, entry.id) else {
                continue;
            };
            let stats = self.linker.link(entry, corpus, &index, store, now);
            counts.links_created += stats.links_created;
            linked_entities.extend(stats.linked_entities);
        }
        counts.entities_linked = linked_entities.len();
        tracing::info!(
            links = counts.links_created,
            entities = counts.entities_linked,
            "linking complete"
        );

        let pairs: Vec<(&DocumentRegistryEntry, DocumentCorpus)> = snapshot
            .active_documents()
            .filter_map(|entry| {
                Self::corpus_for(&corpora, entry.id).map(|corpus| (entry, corpus.clone()))
            })
            .collect();
        let evidence_stats =
            self.evidence
                .map(snapshot, &pairs, &index, &self.linker, store, as_of, now);
        counts.obligations_satisfied = evidence_stats.obligations_satisfied;
        counts.links_created += evidence_stats.links_created;

        let conflict_stats = self
            .conflicts
            .detect(snapshot, &index, &self.linker, store, now);
        counts.conflicts_detected = conflict_stats.conflicts_detected;
        counts.links_created += conflict_stats.links_created;

        let status = if counts.conflicts_detected > 0 {
            RunStatus::Partial
        } else {
            RunStatus::Pass
        };
        tracing::info!(?status, ?counts, "pipeline run finished");
        RunSummary::new(&self.mode, as_of, status, counts)
    }

    /// Classify, profile, and anchor every active document
    fn profile_documents<P: CorpusProvider, S: GraphStore>(
        &self,
        snapshot: &mut FundSnapshot,
        provider: &P,
        store: &mut S,
    ) -> Vec<(DocumentId, DocumentCorpus)> {
        let mut corpora = Vec::new();
        for entry in snapshot.documents.iter_mut().filter(|d| d.is_active()) {
            let corpus = match provider.chunks(entry) {
                Ok(chunks) => DocumentCorpus::assemble(entry, &chunks),
                Err(err) => {
                    // The caller-owned fallback policy: degraded but
                    // non-empty text, so profiling always proceeds.
                    tracing::warn!(document = %entry.id, %err, "corpus degraded to title + path");
                    DocumentCorpus::degraded(entry)
                }
            };

            let filename = entry
                .blob_path
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or(entry.title.as_str());
            let verdict = self.classifier.classify(
                &entry.container,
                filename,
                entry.domain_tag.as_deref(),
                corpus.raw_text(),
            );
            entry.set_detected_doc_type(verdict.doc_type);
            store.upsert_classification(DocumentClassification::new(
                entry.fund,
                entry.id,
                verdict.doc_type,
                verdict.confidence,
                verdict.basis,
            ));

            let ruling = self.resolver.resolve(
                &entry.authority_tag,
                verdict.doc_type,
                &entry.container,
                &entry.blob_path,
            );
            let shareability_final = self
                .resolver
                .final_shareability(entry.shareability, ruling.resolved_authority);
            store.upsert_profile(DocumentGovernanceProfile::new(
                entry.fund,
                entry.id,
                ruling.resolved_authority,
                ruling.binding_scope,
                shareability_final,
                ruling.jurisdiction,
            ));

            let anchors =
                self.extractor
                    .extract(entry.fund, entry.id, corpus.raw_text(), verdict.doc_type);
            store.replace_anchors(entry.fund, entry.id, anchors);

            corpora.push((entry.id, corpus));
        }
        corpora
    }

    fn corpus_for(
        corpora: &[(DocumentId, DocumentCorpus)],
        id: DocumentId,
    ) -> Option<&DocumentCorpus> {
        corpora
            .iter()
            .find(|(doc_id, _)| *doc_id == id)
            .map(|(_, corpus)| corpus)
    }
}

impl Default for LinkingPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
