//! Keyword reading of free-text product titles.

use std::collections::BTreeSet;

use super::vocabulary::{
    Material, ProductLine, BACKGROUND_KEYWORDS, EXCLUDED_KEYWORDS, MATERIAL_KEYWORDS,
    PRODUCT_LINE_KEYWORDS, SPORT_KEYWORDS,
};

const MIN_TOKEN_CHARS: usize = 3;

/// First entry of `table` whose keyword occurs in `text`, case-insensitively.
fn first_match<T: Copy>(text: &str, table: &[(&str, T)]) -> Option<T> {
    let haystack = text.to_lowercase();
    table.iter().find(|(keyword, _)| haystack.contains(keyword)).map(|(_, value)| *value)
}

pub fn product_line(title: &str) -> Option<ProductLine> {
    first_match(title, PRODUCT_LINE_KEYWORDS)
}

pub fn material(title: &str) -> Option<Material> {
    first_match(title, MATERIAL_KEYWORDS)
}

pub fn background(title: &str) -> Option<&'static str> {
    first_match(title, BACKGROUND_KEYWORDS)
}

pub fn sport(title: &str) -> Option<&'static str> {
    first_match(title, SPORT_KEYWORDS)
}

/// Excluded categories are matched against the SKU and the title together.
pub fn is_excluded(sku: &str, title: &str) -> bool {
    let combined = format!("{sku} {title}").to_lowercase();
    EXCLUDED_KEYWORDS.iter().any(|keyword| combined.contains(keyword))
}

pub fn word_set(title: &str) -> BTreeSet<String> {
    title
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .collect()
}

/// Jaccard overlap of the two titles' word sets; zero when either side has no usable words.
pub fn word_overlap(left: &str, right: &str) -> f64 {
    let left = word_set(left);
    let right = word_set(right);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let shared = left.intersection(&right).count();
    let union = left.union(&right).count();
    shared as f64 / union as f64
}
