pub mod config;
pub mod domain;
pub mod errors;
pub mod matching;

pub use config::{AppConfig, ConfigError, LoadOptions, LogFormat, MatchingConfig};
pub use domain::product::{normalize_sku, ProductRecord};
pub use domain::suggestion::{ConfidenceLevel, Suggestion};
pub use errors::ApplicationError;
pub use matching::{
    ConfidenceThresholds, MatchScore, PairOutcome, ProductAnalysis, RejectReason, ScoringWeights,
    SkuMatcher, SkuStructure,
};
