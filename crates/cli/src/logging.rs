use std::path::Path;

use skumatch_core::config::{AppConfig, LoadOptions, LogFormat, LoggingConfig};
use tracing::Level;

/// Installs the stderr subscriber. A config that fails to load falls back to
/// default logging; the command itself reports the failure.
pub fn init_from_config(config_path: Option<&Path>) {
    let options =
        LoadOptions { config_path: config_path.map(Path::to_path_buf), ..LoadOptions::default() };
    let logging = AppConfig::load(options).map(|config| config.logging).unwrap_or_default();
    init(&logging);
}

pub fn init(logging: &LoggingConfig) {
    let log_level = logging.level.trim().parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed when running inside a test harness.
    let _ = match logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
