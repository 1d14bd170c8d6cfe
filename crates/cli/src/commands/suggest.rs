use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use skumatch_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use skumatch_core::errors::ApplicationError;
use skumatch_core::{normalize_sku, ProductRecord, SkuMatcher, Suggestion};
use uuid::Uuid;

use crate::commands::CommandResult;

const COMMAND: &str = "suggest";

#[derive(Debug, Clone, Args)]
pub struct SuggestArgs {
    /// JSON array of catalog records (`sku`, `productName`, `orderCount`, `platforms`).
    #[arg(long, value_name = "PATH")]
    pub catalog: PathBuf,

    /// SKUs that already have a confirmed mapping, one per line. `#` starts a comment.
    #[arg(long, value_name = "PATH")]
    pub mapped: Option<PathBuf>,

    /// Only suggest targets for this SKU.
    #[arg(long, value_name = "SKU")]
    pub sku: Option<String>,

    /// Maximum suggestions per source (defaults to the configured limit).
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Explicit config file instead of `skumatch.toml` discovery.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub catalog_size: usize,
    pub mapped_count: usize,
    pub suggestion_count: usize,
    pub suggestions: Vec<Suggestion>,
}

pub fn run(args: &SuggestArgs) -> CommandResult {
    match build_report(args) {
        Ok(report) => CommandResult::report(COMMAND, &report),
        Err(error) => {
            tracing::warn!(
                event_name = "cli.suggest.failed",
                error_class = error.error_class(),
                error = %error,
                "suggest command failed"
            );
            CommandResult::from_error(COMMAND, &error)
        }
    }
}

pub fn build_report(args: &SuggestArgs) -> Result<SuggestionReport, ApplicationError> {
    let overrides = if args.sku.is_some() {
        ConfigOverrides { per_source_limit: args.limit, ..ConfigOverrides::default() }
    } else {
        ConfigOverrides { batch_per_source: args.limit, ..ConfigOverrides::default() }
    };
    let config = AppConfig::load(LoadOptions {
        config_path: args.config.clone(),
        require_file: args.config.is_some(),
        overrides,
    })?;

    let catalog = load_catalog(&args.catalog)
        .map_err(|error| ApplicationError::catalog(&args.catalog, format!("{error:#}")))?;
    let mapped = match &args.mapped {
        Some(path) => load_mapped(path)
            .map_err(|error| ApplicationError::catalog(path, format!("{error:#}")))?,
        None => Vec::new(),
    };

    let matcher = SkuMatcher::with_settings(&config.matching);
    let suggestions = match &args.sku {
        Some(sku) => {
            let wanted = normalize_sku(sku);
            let source =
                catalog.iter().find(|record| record.normalized_sku() == wanted).ok_or_else(
                    || {
                        ApplicationError::catalog(
                            &args.catalog,
                            format!("sku `{wanted}` is not in the catalog"),
                        )
                    },
                )?;
            matcher.suggest_for(source, &catalog)
        }
        None => matcher.suggest_all(&catalog, &mapped),
    };

    let report = SuggestionReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        catalog_size: catalog.len(),
        mapped_count: mapped.len(),
        suggestion_count: suggestions.len(),
        suggestions,
    };

    tracing::info!(
        event_name = "cli.suggest.completed",
        run_id = %report.run_id,
        catalog_size = report.catalog_size,
        mapped_count = report.mapped_count,
        suggestion_count = report.suggestion_count,
        "suggestion report generated"
    );

    Ok(report)
}

fn load_catalog(path: &Path) -> anyhow::Result<Vec<ProductRecord>> {
    let raw = fs::read_to_string(path).context("could not read catalog file")?;
    serde_json::from_str(&raw).context("catalog must be a JSON array of product records")
}

fn load_mapped(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = fs::read_to_string(path).context("could not read mapped SKU file")?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
