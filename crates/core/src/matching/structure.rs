//! Structural reading of raw SKU codes: category prefix, name body, suffix classes and digits.

use serde::Serialize;

use crate::domain::product::normalize_sku;

use super::vocabulary::{
    ProductLine, BIN_CODE_SCHEME, DIGIT_RUN, DISPLAY_GROUP_SUFFIXES, KNOWN_PREFIXES_LONGEST_FIRST,
    LEGACY_LINE_CODES, PREFIX_MAX_LEN, PREFIX_MIN_LEN, PREFIX_SUFFIX_TOKENS, VARIANT_SUFFIXES,
};

/// Structural breakdown of one SKU, as reported by `skumatch analyze`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuStructure {
    pub normalized: String,
    pub category_prefix: Option<String>,
    pub name_body: String,
    pub display_group_base: String,
    pub numeric_segments: Vec<String>,
}

impl SkuStructure {
    pub fn parse(sku: &str) -> Self {
        Self {
            normalized: normalize_sku(sku),
            category_prefix: category_prefix(sku),
            name_body: product_name_body(sku),
            display_group_base: display_group_base(sku),
            numeric_segments: numeric_segments(sku),
        }
    }
}

/// Drops a leading line qualifier (`VANTAGE-`, `PTB-`, ...) when something follows it.
fn strip_line_qualifier(normalized: &str) -> &str {
    let Some((head, rest)) = normalized.split_once('-') else {
        return normalized;
    };
    if rest.is_empty() {
        return normalized;
    }
    let is_line_name = ProductLine::ALL.iter().any(|line| line.as_str() == head);
    if is_line_name || LEGACY_LINE_CODES.contains(&head) {
        rest
    } else {
        normalized
    }
}

pub fn category_prefix(sku: &str) -> Option<String> {
    let normalized = normalize_sku(sku);
    let code = strip_line_qualifier(&normalized);

    if BIN_CODE_SCHEME.is_match(code) {
        return None;
    }

    if let Some(known) = KNOWN_PREFIXES_LONGEST_FIRST.iter().find(|prefix| code.starts_with(*prefix))
    {
        return Some((*known).to_string());
    }

    detect_prefix_pattern(code)
}

fn detect_prefix_pattern(code: &str) -> Option<String> {
    let letters: String = code.chars().take_while(char::is_ascii_alphabetic).collect();
    if !(PREFIX_MIN_LEN..=PREFIX_MAX_LEN).contains(&letters.len()) {
        return None;
    }

    let boundary_ok = match code[letters.len()..].chars().next() {
        None => true,
        Some(next) => next == '-' || next.is_ascii_digit(),
    };
    if !boundary_ok {
        return None;
    }

    PREFIX_SUFFIX_TOKENS.iter().any(|token| letters.ends_with(token)).then_some(letters)
}

pub fn product_name_body(sku: &str) -> String {
    let normalized = normalize_sku(sku);
    let mut body = strip_line_qualifier(&normalized);

    if let Some(prefix) = category_prefix(sku) {
        if let Some(rest) = body.strip_prefix(prefix.as_str()) {
            body = rest.strip_prefix('-').unwrap_or(rest);
        }
    }

    let body = strip_display_group_suffix(body);
    strip_variant_suffix(body).to_string()
}

pub fn strip_display_group_suffix(code: &str) -> &str {
    strip_any_suffix(code, DISPLAY_GROUP_SUFFIXES)
}

pub fn strip_variant_suffix(code: &str) -> &str {
    strip_any_suffix(code, VARIANT_SUFFIXES)
}

fn strip_any_suffix<'a>(code: &'a str, suffixes: &[&str]) -> &'a str {
    suffixes
        .iter()
        .find_map(|suffix| code.strip_suffix(suffix).filter(|rest| !rest.is_empty()))
        .unwrap_or(code)
}

/// Full normalized SKU with display-group and variant suffixes peeled off in any order.
pub fn display_group_base(sku: &str) -> String {
    let normalized = normalize_sku(sku);
    let mut base = normalized.as_str();
    loop {
        let stripped = strip_variant_suffix(strip_display_group_suffix(base));
        if stripped == base {
            return base.to_string();
        }
        base = stripped;
    }
}

pub fn numeric_segments(sku: &str) -> Vec<String> {
    let normalized = normalize_sku(sku);
    DIGIT_RUN.find_iter(&normalized).map(|run| run.as_str().to_string()).collect()
}

/// True when the codes are identical once digits are removed but carry different digits.
pub fn differs_by_numeric_segment(left: &str, right: &str) -> bool {
    let left = normalize_sku(left);
    let right = normalize_sku(right);
    let left_skeleton = DIGIT_RUN.replace_all(&left, "");
    let right_skeleton = DIGIT_RUN.replace_all(&right, "");

    left_skeleton == right_skeleton && numeric_segments(&left) != numeric_segments(&right)
}
