use serde::{Deserialize, Serialize};

/// Ordinal reliability of a suggestion, summarised for the reviewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely the same product",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

/// A proposed `source -> target` SKU mapping awaiting human review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub source_sku: String,
    pub target_sku: String,
    pub confidence: ConfidenceLevel,
    pub reason: String,
    pub score: f64,
}

impl Suggestion {
    /// Order-independent identity of the pair, used for symmetric deduplication.
    pub fn pair_key(&self) -> (String, String) {
        pair_key(&self.source_sku, &self.target_sku)
    }
}

pub fn pair_key(left: &str, right: &str) -> (String, String) {
    let left = super::product::normalize_sku(left);
    let right = super::product::normalize_sku(right);
    if left <= right {
        (left, right)
    } else {
        (right, left)
    }
}
