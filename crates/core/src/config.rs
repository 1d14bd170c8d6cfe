use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::{
    ConfidenceThresholds, ScoringWeights, DEFAULT_BATCH_PER_SOURCE, DEFAULT_PER_SOURCE_LIMIT,
    DEFAULT_THRESHOLDS, DEFAULT_WEIGHTS,
};

pub const DEFAULT_CONFIG_FILE: &str = "skumatch.toml";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AppConfig {
    pub matching: MatchingConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchingConfig {
    pub weights: ScoringWeights,
    pub thresholds: ConfidenceThresholds,
    pub per_source_limit: usize,
    pub batch_per_source: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Layer that supplied the effective value of a setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Default,
    File,
    Env,
    Override,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::File => "file",
            Self::Env => "env",
            Self::Override => "override",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-key attribution. Keys never touched by a layer report [`ConfigSource::Default`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConfigSources(BTreeMap<&'static str, ConfigSource>);

impl ConfigSources {
    pub fn get(&self, key: &str) -> ConfigSource {
        self.0.get(key).copied().unwrap_or(ConfigSource::Default)
    }

    fn record(&mut self, key: &'static str, source: ConfigSource) {
        self.0.insert(key, source);
    }
}

#[derive(Clone, Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: Option<PathBuf>,
    pub sources: ConfigSources,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub per_source_limit: Option<usize>,
    pub batch_per_source: Option<usize>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            thresholds: DEFAULT_THRESHOLDS,
            per_source_limit: DEFAULT_PER_SOURCE_LIMIT,
            batch_per_source: DEFAULT_BATCH_PER_SOURCE,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Compact }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

fn assign<T>(
    target: &mut T,
    value: Option<T>,
    key: &'static str,
    source: ConfigSource,
    sources: &mut ConfigSources,
) {
    if let Some(value) = value {
        *target = value;
        sources.record(key, source);
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        Self::load_with_sources(options).map(|loaded| loaded.config)
    }

    /// Loads defaults, then the TOML file, then `SKUMATCH_*` variables, then overrides.
    pub fn load_with_sources(options: LoadOptions) -> Result<LoadedConfig, ConfigError> {
        let mut config = Self::default();
        let mut sources = ConfigSources::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = &maybe_path {
            let patch = read_patch(path)?;
            config.apply_patch(patch, &mut sources);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides(&mut sources)?;
        config.apply_overrides(options.overrides, &mut sources);
        config.validate()?;

        Ok(LoadedConfig { config, path: maybe_path, sources })
    }

    fn apply_patch(&mut self, patch: ConfigPatch, sources: &mut ConfigSources) {
        let file = ConfigSource::File;

        if let Some(matching) = patch.matching {
            let target = &mut self.matching;
            assign(
                &mut target.per_source_limit,
                matching.per_source_limit,
                "matching.per_source_limit",
                file,
                sources,
            );
            assign(
                &mut target.batch_per_source,
                matching.batch_per_source,
                "matching.batch_per_source",
                file,
                sources,
            );

            if let Some(weights) = matching.weights {
                let target = &mut self.matching.weights;
                assign(
                    &mut target.code_similarity,
                    weights.code_similarity,
                    "matching.weights.code_similarity",
                    file,
                    sources,
                );
                assign(
                    &mut target.title_overlap,
                    weights.title_overlap,
                    "matching.weights.title_overlap",
                    file,
                    sources,
                );
                assign(
                    &mut target.same_line_boost,
                    weights.same_line_boost,
                    "matching.weights.same_line_boost",
                    file,
                    sources,
                );
                assign(
                    &mut target.equivalent_material_boost,
                    weights.equivalent_material_boost,
                    "matching.weights.equivalent_material_boost",
                    file,
                    sources,
                );
                assign(
                    &mut target.legacy_line_boost,
                    weights.legacy_line_boost,
                    "matching.weights.legacy_line_boost",
                    file,
                    sources,
                );
                assign(
                    &mut target.background_boost,
                    weights.background_boost,
                    "matching.weights.background_boost",
                    file,
                    sources,
                );
                assign(
                    &mut target.strong_title_boost,
                    weights.strong_title_boost,
                    "matching.weights.strong_title_boost",
                    file,
                    sources,
                );
                assign(
                    &mut target.strong_title_min_overlap,
                    weights.strong_title_min_overlap,
                    "matching.weights.strong_title_min_overlap",
                    file,
                    sources,
                );
            }

            if let Some(thresholds) = matching.thresholds {
                let target = &mut self.matching.thresholds;
                assign(&mut target.high, thresholds.high, "matching.thresholds.high", file, sources);
                assign(
                    &mut target.legacy_high,
                    thresholds.legacy_high,
                    "matching.thresholds.legacy_high",
                    file,
                    sources,
                );
                assign(
                    &mut target.medium,
                    thresholds.medium,
                    "matching.thresholds.medium",
                    file,
                    sources,
                );
                assign(
                    &mut target.accept,
                    thresholds.accept,
                    "matching.thresholds.accept",
                    file,
                    sources,
                );
                assign(
                    &mut target.legacy_accept,
                    thresholds.legacy_accept,
                    "matching.thresholds.legacy_accept",
                    file,
                    sources,
                );
            }
        }

        if let Some(logging) = patch.logging {
            assign(&mut self.logging.level, logging.level, "logging.level", file, sources);
            assign(&mut self.logging.format, logging.format, "logging.format", file, sources);
        }
    }

    fn apply_env_overrides(&mut self, sources: &mut ConfigSources) -> Result<(), ConfigError> {
        let envs = ConfigSource::Env;

        let per_source_limit = read_env("SKUMATCH_MATCHING_PER_SOURCE_LIMIT")
            .map(|value| parse_usize("SKUMATCH_MATCHING_PER_SOURCE_LIMIT", &value))
            .transpose()?;
        assign(
            &mut self.matching.per_source_limit,
            per_source_limit,
            "matching.per_source_limit",
            envs,
            sources,
        );
        let batch_per_source = read_env("SKUMATCH_MATCHING_BATCH_PER_SOURCE")
            .map(|value| parse_usize("SKUMATCH_MATCHING_BATCH_PER_SOURCE", &value))
            .transpose()?;
        assign(
            &mut self.matching.batch_per_source,
            batch_per_source,
            "matching.batch_per_source",
            envs,
            sources,
        );

        let thresholds = &mut self.matching.thresholds;
        assign(
            &mut thresholds.high,
            read_env_f64("SKUMATCH_THRESHOLDS_HIGH")?,
            "matching.thresholds.high",
            envs,
            sources,
        );
        assign(
            &mut thresholds.legacy_high,
            read_env_f64("SKUMATCH_THRESHOLDS_LEGACY_HIGH")?,
            "matching.thresholds.legacy_high",
            envs,
            sources,
        );
        assign(
            &mut thresholds.medium,
            read_env_f64("SKUMATCH_THRESHOLDS_MEDIUM")?,
            "matching.thresholds.medium",
            envs,
            sources,
        );
        assign(
            &mut thresholds.accept,
            read_env_f64("SKUMATCH_THRESHOLDS_ACCEPT")?,
            "matching.thresholds.accept",
            envs,
            sources,
        );
        assign(
            &mut thresholds.legacy_accept,
            read_env_f64("SKUMATCH_THRESHOLDS_LEGACY_ACCEPT")?,
            "matching.thresholds.legacy_accept",
            envs,
            sources,
        );

        let log_level =
            read_env("SKUMATCH_LOGGING_LEVEL").or_else(|| read_env("SKUMATCH_LOG_LEVEL"));
        assign(&mut self.logging.level, log_level, "logging.level", envs, sources);
        let log_format = read_env("SKUMATCH_LOGGING_FORMAT")
            .or_else(|| read_env("SKUMATCH_LOG_FORMAT"))
            .map(|value| value.parse::<LogFormat>())
            .transpose()?;
        assign(&mut self.logging.format, log_format, "logging.format", envs, sources);

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides, sources: &mut ConfigSources) {
        let source = ConfigSource::Override;
        assign(
            &mut self.matching.per_source_limit,
            overrides.per_source_limit,
            "matching.per_source_limit",
            source,
            sources,
        );
        assign(
            &mut self.matching.batch_per_source,
            overrides.batch_per_source,
            "matching.batch_per_source",
            source,
            sources,
        );
        assign(&mut self.logging.level, overrides.log_level, "logging.level", source, sources);
        assign(&mut self.logging.format, overrides.log_format, "logging.format", source, sources);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_matching(&self.matching)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from("config").join(DEFAULT_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

const MAX_THRESHOLD: f64 = 2.0;

fn validate_matching(matching: &MatchingConfig) -> Result<(), ConfigError> {
    if matching.per_source_limit == 0 {
        return Err(ConfigError::Validation(
            "matching.per_source_limit must be greater than zero".to_string(),
        ));
    }
    if matching.batch_per_source == 0 {
        return Err(ConfigError::Validation(
            "matching.batch_per_source must be greater than zero".to_string(),
        ));
    }

    let weights = &matching.weights;
    let named_weights = [
        ("code_similarity", weights.code_similarity),
        ("title_overlap", weights.title_overlap),
        ("same_line_boost", weights.same_line_boost),
        ("equivalent_material_boost", weights.equivalent_material_boost),
        ("legacy_line_boost", weights.legacy_line_boost),
        ("background_boost", weights.background_boost),
        ("strong_title_boost", weights.strong_title_boost),
        ("strong_title_min_overlap", weights.strong_title_min_overlap),
    ];
    for (name, value) in named_weights {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Validation(format!(
                "matching.weights.{name} must be a finite, non-negative number"
            )));
        }
    }

    let thresholds = &matching.thresholds;
    let named_thresholds = [
        ("high", thresholds.high),
        ("legacy_high", thresholds.legacy_high),
        ("medium", thresholds.medium),
        ("accept", thresholds.accept),
        ("legacy_accept", thresholds.legacy_accept),
    ];
    for (name, value) in named_thresholds {
        if !value.is_finite() || !(0.0..=MAX_THRESHOLD).contains(&value) {
            return Err(ConfigError::Validation(format!(
                "matching.thresholds.{name} must be in range 0.0..={MAX_THRESHOLD:.1}"
            )));
        }
    }

    if thresholds.medium > thresholds.high {
        return Err(ConfigError::Validation(
            "matching.thresholds.medium must not exceed matching.thresholds.high".to_string(),
        ));
    }
    if thresholds.legacy_high > thresholds.high {
        return Err(ConfigError::Validation(
            "matching.thresholds.legacy_high must not exceed matching.thresholds.high".to_string(),
        ));
    }
    if thresholds.legacy_accept > thresholds.accept {
        return Err(ConfigError::Validation(
            "matching.thresholds.legacy_accept must not exceed matching.thresholds.accept"
                .to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn read_env_f64(key: &str) -> Result<Option<f64>, ConfigError> {
    read_env(key).map(|value| parse_f64(key, &value)).transpose()
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    matching: Option<MatchingPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatchingPatch {
    per_source_limit: Option<usize>,
    batch_per_source: Option<usize>,
    weights: Option<WeightsPatch>,
    thresholds: Option<ThresholdsPatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct WeightsPatch {
    code_similarity: Option<f64>,
    title_overlap: Option<f64>,
    same_line_boost: Option<f64>,
    equivalent_material_boost: Option<f64>,
    legacy_line_boost: Option<f64>,
    background_boost: Option<f64>,
    strong_title_boost: Option<f64>,
    strong_title_min_overlap: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThresholdsPatch {
    high: Option<f64>,
    legacy_high: Option<f64>,
    medium: Option<f64>,
    accept: Option<f64>,
    legacy_accept: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
