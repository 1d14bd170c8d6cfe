use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Failures outside the matching engine. The engine itself never errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("configuration failure: {0}")]
    Configuration(String),
    #[error("catalog input failure for `{path}`: {message}")]
    Catalog { path: PathBuf, message: String },
}

impl ApplicationError {
    pub fn catalog(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Catalog { path: path.into(), message: message.into() }
    }

    /// Stable machine-readable class reported in command outcomes.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Catalog { .. } => "catalog",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Configuration(_) => {
                "The configuration could not be loaded. Check the config file and SKUMATCH_* variables."
            }
            Self::Catalog { .. } => {
                "The catalog input could not be read. Check the file path and JSON format."
            }
        }
    }
}

impl From<ConfigError> for ApplicationError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value.to_string())
    }
}
