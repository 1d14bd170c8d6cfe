//! Hard reject rules evaluated before a pair is scored.

use std::fmt;

use crate::domain::product::{normalize_sku, ProductRecord};

use super::analysis::ProductAnalysis;
use super::structure;

/// Why a pair was dropped. Rejections are deliberate non-matches, not failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    SelfMatch,
    Excluded,
    NumericSegment,
    CategoryPrefix,
    VariantSuffix,
    DisplayGroupSuffix,
    DisplayGroupBase,
    ProductLineConflict,
    MaterialConflict,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfMatch => "self_match",
            Self::Excluded => "excluded",
            Self::NumericSegment => "numeric_segment",
            Self::CategoryPrefix => "category_prefix",
            Self::VariantSuffix => "variant_suffix",
            Self::DisplayGroupSuffix => "display_group_suffix",
            Self::DisplayGroupBase => "display_group_base",
            Self::ProductLineConflict => "product_line_conflict",
            Self::MaterialConflict => "material_conflict",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First structural rule that drops the pair, in fixed order.
pub fn reject_reason(
    source: &ProductRecord,
    source_analysis: &ProductAnalysis,
    candidate: &ProductRecord,
    candidate_analysis: &ProductAnalysis,
) -> Option<RejectReason> {
    let source_sku = normalize_sku(&source.sku);
    let candidate_sku = normalize_sku(&candidate.sku);

    if source_sku == candidate_sku {
        return Some(RejectReason::SelfMatch);
    }
    if source_analysis.is_excluded || candidate_analysis.is_excluded {
        return Some(RejectReason::Excluded);
    }
    if structure::differs_by_numeric_segment(&source_sku, &candidate_sku) {
        return Some(RejectReason::NumericSegment);
    }
    if category_prefix_differs(&source_sku, source_analysis, &candidate_sku, candidate_analysis) {
        return Some(RejectReason::CategoryPrefix);
    }
    if structure::strip_variant_suffix(&source_sku)
        == structure::strip_variant_suffix(&candidate_sku)
    {
        return Some(RejectReason::VariantSuffix);
    }
    if structure::strip_display_group_suffix(&source_sku)
        == structure::strip_display_group_suffix(&candidate_sku)
    {
        return Some(RejectReason::DisplayGroupSuffix);
    }
    if structure::display_group_base(&source_sku) == structure::display_group_base(&candidate_sku)
    {
        return Some(RejectReason::DisplayGroupBase);
    }

    None
}

fn category_prefix_differs(
    source_sku: &str,
    source_analysis: &ProductAnalysis,
    candidate_sku: &str,
    candidate_analysis: &ProductAnalysis,
) -> bool {
    let source_prefix = source_analysis.category_prefix.as_deref();
    let candidate_prefix = candidate_analysis.category_prefix.as_deref();

    if let (Some(left), Some(right)) = (source_prefix, candidate_prefix) {
        if left != right {
            return true;
        }
    }

    source_prefix != candidate_prefix
        && structure::product_name_body(source_sku) == structure::product_name_body(candidate_sku)
}
