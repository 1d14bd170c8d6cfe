use serde::Serialize;

use crate::domain::product::{normalize_sku, ProductRecord};

use super::legacy::{self, LegacyMatch};
use super::structure;
use super::title;
use super::vocabulary::{Material, ProductLine, BACKGROUND_CODES};

/// Derived, per-call view of a record. Never cached between calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysis {
    pub category_prefix: Option<String>,
    pub product_line: Option<ProductLine>,
    pub material: Option<Material>,
    pub background: Option<&'static str>,
    pub sport: Option<&'static str>,
    pub legacy: Option<LegacyMatch>,
    pub is_excluded: bool,
}

impl ProductAnalysis {
    pub fn of(record: &ProductRecord) -> Self {
        let sku = record.sku.as_str();
        let name = record.product_name.as_str();
        let legacy = legacy::resolve(sku);

        let product_line = title::product_line(name)
            .or_else(|| line_from_segments(sku))
            .or_else(|| legacy.as_ref().map(|found| found.line));

        Self {
            category_prefix: structure::category_prefix(sku),
            product_line,
            material: title::material(name).or_else(|| material_from_segments(sku)),
            background: title::background(name).or_else(|| background_from_segments(sku)),
            sport: title::sport(name),
            legacy,
            is_excluded: title::is_excluded(sku, name),
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy.is_some()
    }
}

fn segments(sku: &str) -> Vec<String> {
    normalize_sku(sku).split('-').filter(|part| !part.is_empty()).map(str::to_string).collect()
}

fn line_from_segments(sku: &str) -> Option<ProductLine> {
    let parts = segments(sku);
    ProductLine::ALL.into_iter().find(|line| parts.iter().any(|part| part == line.as_str()))
}

fn material_from_segments(sku: &str) -> Option<Material> {
    let parts = segments(sku);
    Material::ALL.into_iter().find(|material| parts.iter().any(|part| part == material.code()))
}

fn background_from_segments(sku: &str) -> Option<&'static str> {
    let parts = segments(sku);
    BACKGROUND_CODES
        .iter()
        .find(|(code, _)| parts.iter().any(|part| part == code))
        .map(|(_, tag)| *tag)
}
