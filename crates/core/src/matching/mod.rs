//! SKU matching and suggestion engine
//!
//! Proposes `source -> target` mappings between catalog codes that describe the
//! same physical product. Every pair passes the structural filter first, then the
//! semantic scorer; survivors are ranked per source and deduplicated across the
//! batch. The engine never fails: missing data only lowers scores.

pub mod analysis;
pub mod filter;
pub mod legacy;
pub mod ranking;
pub mod scoring;
pub mod structure;
pub mod title;
pub mod vocabulary;

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::config::MatchingConfig;
use crate::domain::product::{normalize_sku, ProductRecord};
use crate::domain::suggestion::Suggestion;

pub use analysis::ProductAnalysis;
pub use filter::RejectReason;
pub use legacy::LegacyMatch;
pub use scoring::{ConfidenceThresholds, MatchScore, MatchScorer, PairOutcome, ScoringWeights};
pub use structure::SkuStructure;
pub use vocabulary::{Material, ProductLine};

/// Default scoring weights
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    code_similarity: 0.40,
    title_overlap: 0.40,
    same_line_boost: 0.15,
    equivalent_material_boost: 0.10,
    legacy_line_boost: 0.20,
    background_boost: 0.05,
    strong_title_boost: 0.10,
    strong_title_min_overlap: 0.80,
};

/// Default confidence and acceptance thresholds
pub const DEFAULT_THRESHOLDS: ConfidenceThresholds = ConfidenceThresholds {
    high: 0.85,
    legacy_high: 0.70,
    medium: 0.65,
    accept: 0.50,
    legacy_accept: 0.45,
};

/// Suggestions returned for a single source
pub const DEFAULT_PER_SOURCE_LIMIT: usize = 3;

/// Suggestions kept per source during a batch run
pub const DEFAULT_BATCH_PER_SOURCE: usize = 2;

#[derive(Debug, Clone)]
pub struct SkuMatcher {
    scorer: MatchScorer,
    per_source_limit: usize,
    batch_per_source: usize,
}

impl Default for SkuMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SkuMatcher {
    pub fn new() -> Self {
        Self::with_settings(&MatchingConfig::default())
    }

    pub fn with_settings(settings: &MatchingConfig) -> Self {
        Self {
            scorer: MatchScorer::with_settings(settings.weights, settings.thresholds),
            per_source_limit: settings.per_source_limit.max(1),
            batch_per_source: settings.batch_per_source.max(1),
        }
    }

    pub fn analyze(&self, record: &ProductRecord) -> ProductAnalysis {
        ProductAnalysis::of(record)
    }

    /// Runs the structural filter and, when it passes, the scorer.
    pub fn evaluate_pair(&self, source: &ProductRecord, candidate: &ProductRecord) -> PairOutcome {
        self.evaluate_analyzed(
            source,
            &ProductAnalysis::of(source),
            candidate,
            &ProductAnalysis::of(candidate),
        )
    }

    /// Best candidates for one source, highest score first.
    pub fn suggest_for(&self, source: &ProductRecord, catalog: &[ProductRecord]) -> Vec<Suggestion> {
        let source_analysis = ProductAnalysis::of(source);
        let analyses = analyze_catalog(catalog);
        self.rank_candidates(source, &source_analysis, catalog, &analyses, self.per_source_limit)
    }

    /// Suggestions for every unmapped source, with each unordered pair reported once.
    ///
    /// `mapped` holds SKUs that already have a confirmed mapping; they are compared
    /// after normalization and never act as a source. They can still be targets.
    pub fn suggest_all<I>(&self, catalog: &[ProductRecord], mapped: I) -> Vec<Suggestion>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mapped: HashSet<String> =
            mapped.into_iter().map(|sku| normalize_sku(sku.as_ref())).collect();
        let analyses = analyze_catalog(catalog);

        let per_source: Vec<Vec<Suggestion>> = catalog
            .par_iter()
            .zip(analyses.par_iter())
            .filter(|(record, _)| !mapped.contains(&record.normalized_sku()))
            .map(|(record, analysis)| {
                self.rank_candidates(record, analysis, catalog, &analyses, self.batch_per_source)
            })
            .collect();

        let sources_scanned = per_source.len();
        let ranked_count: usize = per_source.iter().map(Vec::len).sum();
        let suggestions = ranking::dedupe_pairs(per_source.into_iter().flatten());

        info!(
            event_name = "matching.batch.completed",
            catalog_size = catalog.len(),
            mapped_count = mapped.len(),
            sources_scanned,
            suggestion_count = suggestions.len(),
            duplicates_dropped = ranked_count - suggestions.len(),
            "batch suggestion run completed"
        );

        suggestions
    }

    fn evaluate_analyzed(
        &self,
        source: &ProductRecord,
        source_analysis: &ProductAnalysis,
        candidate: &ProductRecord,
        candidate_analysis: &ProductAnalysis,
    ) -> PairOutcome {
        if let Some(reason) =
            filter::reject_reason(source, source_analysis, candidate, candidate_analysis)
        {
            return PairOutcome::Rejected(reason);
        }

        self.scorer.score(source, source_analysis, candidate, candidate_analysis)
    }

    fn rank_candidates(
        &self,
        source: &ProductRecord,
        source_analysis: &ProductAnalysis,
        catalog: &[ProductRecord],
        analyses: &[ProductAnalysis],
        limit: usize,
    ) -> Vec<Suggestion> {
        let accepted: Vec<Suggestion> = catalog
            .iter()
            .zip(analyses)
            .filter_map(|(candidate, candidate_analysis)| {
                match self.evaluate_analyzed(source, source_analysis, candidate, candidate_analysis)
                {
                    PairOutcome::Accepted(result) => Some(Suggestion {
                        source_sku: source.sku.clone(),
                        target_sku: candidate.sku.clone(),
                        confidence: result.confidence,
                        reason: result.reason(),
                        score: result.score,
                    }),
                    PairOutcome::Rejected(reason) => {
                        trace!(
                            event_name = "matching.candidate.rejected",
                            source_sku = %source.sku,
                            candidate_sku = %candidate.sku,
                            reason = %reason,
                            "candidate rejected"
                        );
                        None
                    }
                    PairOutcome::BelowThreshold(result) => {
                        trace!(
                            event_name = "matching.candidate.below_threshold",
                            source_sku = %source.sku,
                            candidate_sku = %candidate.sku,
                            score = result.score,
                            legacy = result.legacy,
                            "candidate scored below acceptance threshold"
                        );
                        None
                    }
                }
            })
            .collect();

        let accepted_count = accepted.len();
        let ranked = ranking::top_ranked(accepted, limit);
        debug!(
            event_name = "matching.source.ranked",
            source_sku = %source.sku,
            accepted_count,
            returned_count = ranked.len(),
            "ranked candidates for source"
        );

        ranked
    }
}

fn analyze_catalog(catalog: &[ProductRecord]) -> Vec<ProductAnalysis> {
    catalog.par_iter().map(ProductAnalysis::of).collect()
}
