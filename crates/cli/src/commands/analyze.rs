use clap::Args;
use serde::Serialize;
use skumatch_core::{ProductAnalysis, ProductRecord, SkuMatcher, SkuStructure};

use crate::commands::CommandResult;

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// SKU to break down.
    #[arg(long, value_name = "SKU")]
    pub sku: String,

    /// Product title; title-derived signals are empty without it.
    #[arg(long, value_name = "TITLE", default_value = "")]
    pub title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub sku: String,
    pub product_name: String,
    pub structure: SkuStructure,
    pub analysis: ProductAnalysis,
}

pub fn run(args: &AnalyzeArgs) -> CommandResult {
    let record = ProductRecord::new(args.sku.as_str(), args.title.as_str());
    let report = AnalysisReport {
        structure: SkuStructure::parse(&record.sku),
        analysis: SkuMatcher::new().analyze(&record),
        sku: record.sku,
        product_name: record.product_name,
    };

    CommandResult::report("analyze", &report)
}
