//! Weighted pair scoring with semantic boosts and confidence tiers.

use serde::{Deserialize, Serialize};

use crate::domain::product::ProductRecord;
use crate::domain::suggestion::ConfidenceLevel;

use super::analysis::ProductAnalysis;
use super::filter::RejectReason;
use super::legacy;
use super::title;

/// Weights for the base components and the additive boosts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight of the normalized edit similarity between the raw codes (default: 0.40)
    pub code_similarity: f64,
    /// Weight of the title word overlap (default: 0.40)
    pub title_overlap: f64,
    /// Both sides carry the same product line (default: 0.15)
    pub same_line_boost: f64,
    /// Both sides carry interchangeable materials (default: 0.10)
    pub equivalent_material_boost: f64,
    /// A legacy side resolves to the other side's line (default: 0.20)
    pub legacy_line_boost: f64,
    /// Both sides share a background tag (default: 0.05)
    pub background_boost: f64,
    /// Title overlap reaches `strong_title_min_overlap` (default: 0.10)
    pub strong_title_boost: f64,
    /// Overlap needed for `strong_title_boost` (default: 0.80)
    pub strong_title_min_overlap: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// Score boundaries for confidence tiers and acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    /// Minimum score for [`ConfidenceLevel::High`] (default: 0.85).
    pub high: f64,
    /// Minimum score for [`ConfidenceLevel::High`] when either side is legacy (default: 0.70).
    pub legacy_high: f64,
    /// Minimum score for [`ConfidenceLevel::Medium`] (default: 0.65).
    pub medium: f64,
    /// Minimum score to keep a candidate (default: 0.50).
    pub accept: f64,
    /// Minimum score to keep a candidate when either side is legacy (default: 0.45).
    pub legacy_accept: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        super::DEFAULT_THRESHOLDS
    }
}

impl ConfidenceThresholds {
    pub fn categorize(&self, score: f64, legacy: bool) -> ConfidenceLevel {
        if score >= self.high || (legacy && score >= self.legacy_high) {
            ConfidenceLevel::High
        } else if score >= self.medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn accepts(&self, score: f64, legacy: bool) -> bool {
        let minimum = if legacy { self.legacy_accept } else { self.accept };
        score >= minimum
    }
}

/// Full scoring breakdown for one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    pub score: f64,
    pub code_similarity: f64,
    pub title_overlap: f64,
    pub legacy: bool,
    pub confidence: ConfidenceLevel,
    pub reasons: Vec<String>,
}

impl MatchScore {
    pub fn reason(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    Rejected(RejectReason),
    BelowThreshold(MatchScore),
    Accepted(MatchScore),
}

impl PairOutcome {
    pub fn accepted(self) -> Option<MatchScore> {
        match self {
            Self::Accepted(score) => Some(score),
            Self::Rejected(_) | Self::BelowThreshold(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    weights: ScoringWeights,
    thresholds: ConfidenceThresholds,
}

impl MatchScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(weights: ScoringWeights, thresholds: ConfidenceThresholds) -> Self {
        Self { weights, thresholds }
    }

    pub fn thresholds(&self) -> &ConfidenceThresholds {
        &self.thresholds
    }

    /// Scores a pair that already survived the structural filter.
    pub fn score(
        &self,
        source: &ProductRecord,
        source_analysis: &ProductAnalysis,
        candidate: &ProductRecord,
        candidate_analysis: &ProductAnalysis,
    ) -> PairOutcome {
        if let Some(reason) = semantic_conflict(source_analysis, candidate_analysis) {
            return PairOutcome::Rejected(reason);
        }

        let weights = &self.weights;
        let code_similarity = code_similarity(&source.sku, &candidate.sku);
        let title_overlap = title::word_overlap(&source.product_name, &candidate.product_name);

        let mut score =
            weights.code_similarity * code_similarity + weights.title_overlap * title_overlap;
        let mut reasons = vec![
            format!("SKU similarity {:.0}%", code_similarity * 100.0),
            format!("title overlap {:.0}%", title_overlap * 100.0),
        ];

        if let (Some(left), Some(right)) =
            (source_analysis.product_line, candidate_analysis.product_line)
        {
            if left == right {
                score += weights.same_line_boost;
                reasons.push(format!("same product line ({})", left.as_str()));
            }
        }

        if let (Some(left), Some(right)) = (source_analysis.material, candidate_analysis.material) {
            if legacy::materials_equivalent(left, right) {
                score += weights.equivalent_material_boost;
                reasons.push(format!("equivalent materials ({} / {})", left.code(), right.code()));
            }
        }

        let legacy_resolution = [(source_analysis, candidate_analysis), (candidate_analysis, source_analysis)]
            .into_iter()
            .find_map(|(side, other)| {
                let found = side.legacy.as_ref()?;
                (other.product_line == Some(found.line)).then_some(found)
            });
        if let Some(found) = legacy_resolution {
            score += weights.legacy_line_boost;
            reasons.push(format!("legacy code resolves to {}: {}", found.line.as_str(), found.note));
        }

        if let (Some(left), Some(right)) =
            (source_analysis.background, candidate_analysis.background)
        {
            if left == right {
                score += weights.background_boost;
                reasons.push(format!("same background ({left})"));
            }
        }

        if title_overlap >= weights.strong_title_min_overlap {
            score += weights.strong_title_boost;
            reasons.push("strong title overlap".to_string());
        }

        let legacy = source_analysis.is_legacy() || candidate_analysis.is_legacy();
        let result = MatchScore {
            score,
            code_similarity,
            title_overlap,
            legacy,
            confidence: self.thresholds.categorize(score, legacy),
            reasons,
        };

        if self.thresholds.accepts(score, legacy) {
            PairOutcome::Accepted(result)
        } else {
            PairOutcome::BelowThreshold(result)
        }
    }
}

fn semantic_conflict(left: &ProductAnalysis, right: &ProductAnalysis) -> Option<RejectReason> {
    if let (Some(left_line), Some(right_line)) = (left.product_line, right.product_line) {
        if left_line != right_line && !left.is_legacy() && !right.is_legacy() {
            return Some(RejectReason::ProductLineConflict);
        }
    }

    if let (Some(left_material), Some(right_material)) = (left.material, right.material) {
        if !legacy::materials_equivalent(left_material, right_material) {
            return Some(RejectReason::MaterialConflict);
        }
    }

    None
}

/// `1 - levenshtein / longest` over the case-folded codes; zero when either code is empty.
pub fn code_similarity(left: &str, right: &str) -> f64 {
    let left = left.trim().to_lowercase();
    let right = right.trim().to_lowercase();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let longest = left.chars().count().max(right.chars().count());
    1.0 - strsim::levenshtein(&left, &right) as f64 / longest as f64
}
