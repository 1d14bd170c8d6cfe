use std::path::PathBuf;

use clap::Args;
use skumatch_core::config::{AppConfig, ConfigSource, LoadOptions, LoadedConfig};
use skumatch_core::errors::ApplicationError;

use crate::commands::CommandResult;

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Explicit config file instead of `skumatch.toml` discovery.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

pub fn run(args: &ConfigArgs) -> CommandResult {
    let loaded = match AppConfig::load_with_sources(LoadOptions {
        config_path: args.config.clone(),
        require_file: args.config.is_some(),
        ..LoadOptions::default()
    }) {
        Ok(loaded) => loaded,
        Err(error) => return CommandResult::from_error("config", &ApplicationError::from(error)),
    };

    CommandResult { exit_code: 0, output: render(&loaded) }
}

fn render(loaded: &LoadedConfig) -> String {
    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.extend(
        entries(&loaded.config)
            .into_iter()
            .map(|(key, value)| render_line(key, &value, source_label(loaded, key))),
    );
    lines.join("\n")
}

fn entries(config: &AppConfig) -> Vec<(&'static str, String)> {
    let matching = &config.matching;
    let weights = &matching.weights;
    let thresholds = &matching.thresholds;

    vec![
        ("matching.per_source_limit", matching.per_source_limit.to_string()),
        ("matching.batch_per_source", matching.batch_per_source.to_string()),
        ("matching.weights.code_similarity", weights.code_similarity.to_string()),
        ("matching.weights.title_overlap", weights.title_overlap.to_string()),
        ("matching.weights.same_line_boost", weights.same_line_boost.to_string()),
        (
            "matching.weights.equivalent_material_boost",
            weights.equivalent_material_boost.to_string(),
        ),
        ("matching.weights.legacy_line_boost", weights.legacy_line_boost.to_string()),
        ("matching.weights.background_boost", weights.background_boost.to_string()),
        ("matching.weights.strong_title_boost", weights.strong_title_boost.to_string()),
        (
            "matching.weights.strong_title_min_overlap",
            weights.strong_title_min_overlap.to_string(),
        ),
        ("matching.thresholds.high", thresholds.high.to_string()),
        ("matching.thresholds.legacy_high", thresholds.legacy_high.to_string()),
        ("matching.thresholds.medium", thresholds.medium.to_string()),
        ("matching.thresholds.accept", thresholds.accept.to_string()),
        ("matching.thresholds.legacy_accept", thresholds.legacy_accept.to_string()),
        ("logging.level", config.logging.level.clone()),
        ("logging.format", format!("{:?}", config.logging.format)),
    ]
}

fn source_label(loaded: &LoadedConfig, key: &str) -> String {
    match loaded.sources.get(key) {
        ConfigSource::File => {
            let file_path = loaded
                .path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            format!("file ({file_path})")
        }
        other => other.to_string(),
    }
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
