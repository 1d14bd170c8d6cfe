//! Legacy SKU patterns and material equivalence.

use serde::Serialize;

use crate::domain::product::normalize_sku;

use super::vocabulary::{Material, ProductLine, EQUIVALENT_MATERIALS, LEGACY_PATTERNS};

/// A superseded SKU format and the line it now belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMatch {
    pub line: ProductLine,
    pub note: &'static str,
}

pub fn resolve(sku: &str) -> Option<LegacyMatch> {
    let normalized = normalize_sku(sku);
    LEGACY_PATTERNS
        .iter()
        .find(|entry| entry.pattern.is_match(&normalized))
        .map(|entry| LegacyMatch { line: entry.line, note: entry.note })
}

pub fn materials_equivalent(left: Material, right: Material) -> bool {
    left == right || (EQUIVALENT_MATERIALS.contains(&left) && EQUIVALENT_MATERIALS.contains(&right))
}
