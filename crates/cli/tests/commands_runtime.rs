use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use skumatch_cli::commands::analyze::{self, AnalyzeArgs};
use skumatch_cli::commands::config::{self, ConfigArgs};
use skumatch_cli::commands::suggest::{self, SuggestArgs};
use tempfile::TempDir;

const CATALOG: &str = r#"[
  {"sku": "PTB-GBC-HIO", "productName": "Premium Turf Base Golf Ball Case Hole In One", "orderCount": 14},
  {"sku": "VANTAGE-GBC-HIO", "productName": "Vantage Golf Ball Case Hole In One Display", "platforms": ["shopify"]},
  {"sku": "GBC-EAGLE", "productName": "Golf Ball Case Eagle"},
  {"sku": "TBC-EAGLE", "productName": "Golf Ball Case Eagle"},
  {"sku": "NECKLACE-GOLD-01", "productName": "Gold Necklace"}
]"#;

#[test]
fn suggest_reports_legacy_replacement() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let result = suggest::run(&fixture.args());
        assert_eq!(result.exit_code, 0, "expected successful suggest run: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["catalogSize"], 5);
        assert_eq!(payload["mappedCount"], 0);
        assert_eq!(payload["suggestionCount"], 1);
        assert!(payload["runId"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(payload["generatedAt"].as_str().is_some());

        let suggestion = &payload["suggestions"][0];
        assert_eq!(suggestion["sourceSku"], "PTB-GBC-HIO");
        assert_eq!(suggestion["targetSku"], "VANTAGE-GBC-HIO");
        assert_eq!(suggestion["confidence"], "high");
    });
}

#[test]
fn suggest_skips_mapped_sources() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let mapped = fixture.write("mapped.txt", "# confirmed mappings\n ptb-gbc-hio \n\n");
        let args = SuggestArgs { mapped: Some(mapped), ..fixture.args() };

        let result = suggest::run(&args);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["mappedCount"], 1);
        assert_eq!(payload["suggestionCount"], 1);
        assert_eq!(payload["suggestions"][0]["sourceSku"], "VANTAGE-GBC-HIO");
    });
}

#[test]
fn suggest_for_single_sku() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let args = SuggestArgs { sku: Some("vantage-gbc-hio".to_string()), ..fixture.args() };

        let result = suggest::run(&args);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["suggestionCount"], 1);
        assert_eq!(payload["suggestions"][0]["targetSku"], "PTB-GBC-HIO");
    });
}

#[test]
fn suggest_unknown_sku_is_catalog_failure() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let args = SuggestArgs { sku: Some("ZZZ-404".to_string()), ..fixture.args() };

        let result = suggest::run(&args);
        assert_eq!(result.exit_code, 3, "expected catalog failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "suggest");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "catalog");
        assert!(payload["hint"].as_str().is_some_and(|hint| hint.contains("catalog input")));
    });
}

#[test]
fn suggest_rejects_malformed_catalog() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let catalog = fixture.write("broken.json", "{\"sku\": \"GBC-HIO\"}");
        let args = SuggestArgs { catalog, ..fixture.args() };

        let result = suggest::run(&args);
        assert_eq!(result.exit_code, 3);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "catalog");
        assert!(payload["message"].as_str().is_some_and(|m| m.contains("JSON array")));
    });
}

#[test]
fn suggest_reports_missing_catalog_file() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let args = SuggestArgs { catalog: fixture.path("absent.json"), ..fixture.args() };

        let result = suggest::run(&args);
        assert_eq!(result.exit_code, 3);
        assert_eq!(parse_payload(&result.output)["error_class"], "catalog");
    });
}

#[test]
fn suggest_returns_config_failure_for_invalid_thresholds() {
    with_env(&[("SKUMATCH_THRESHOLDS_MEDIUM", "0.99")], || {
        let fixture = Fixture::new();
        let result = suggest::run(&fixture.args());
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "configuration");
    });
}

#[test]
fn suggest_limit_caps_batch_results() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let config = fixture.write("skumatch.toml", "[matching.thresholds]\naccept = 0.0\nlegacy_accept = 0.0\n");
        let args = SuggestArgs { limit: Some(1), config: Some(config), ..fixture.args() };

        let result = suggest::run(&args);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let suggestions = payload["suggestions"].as_array().cloned().unwrap_or_default();
        let mut sources: Vec<&str> =
            suggestions.iter().filter_map(|s| s["sourceSku"].as_str()).collect();
        let total = sources.len();
        sources.dedup();
        assert_eq!(total, sources.len(), "each source should appear at most once");
    });
}

#[test]
fn analyze_prints_structure_and_signals() {
    let result = analyze::run(&AnalyzeArgs {
        sku: "ptb-gbc-hio".to_string(),
        title: "Premium Turf Base Golf Ball Case Hole In One".to_string(),
    });
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["structure"]["normalized"], "PTB-GBC-HIO");
    assert_eq!(payload["structure"]["categoryPrefix"], "GBC");
    assert_eq!(payload["analysis"]["productLine"], "VANTAGE");
    assert_eq!(payload["analysis"]["background"], "HOLE_IN_ONE");
    assert_eq!(payload["analysis"]["legacy"]["line"], "VANTAGE");
    assert_eq!(payload["analysis"]["isExcluded"], false);
}

#[test]
fn config_attributes_env_and_file_sources() {
    with_env(&[("SKUMATCH_LOG_LEVEL", "warn")], || {
        let fixture = Fixture::new();
        let path = fixture.write("skumatch.toml", "[matching]\nbatch_per_source = 4\n");

        let result = config::run(&ConfigArgs { config: Some(path.clone()) });
        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("- logging.level = warn (source: env)"));
        assert!(result
            .output
            .contains(&format!("- matching.batch_per_source = 4 (source: file ({}))", path.display())));
        assert!(result.output.contains("- matching.per_source_limit = 3 (source: default)"));
    });
}

#[test]
fn config_reports_missing_explicit_file() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let result = config::run(&ConfigArgs { config: Some(fixture.path("absent.toml")) });
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "configuration");
    });
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir should be created");
        let fixture = Self { dir };
        fixture.write("catalog.json", CATALOG);
        fixture
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).expect("fixture file should be written");
        path
    }

    fn args(&self) -> SuggestArgs {
        SuggestArgs {
            catalog: self.path("catalog.json"),
            mapped: None,
            sku: None,
            limit: None,
            config: None,
        }
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "SKUMATCH_MATCHING_PER_SOURCE_LIMIT",
        "SKUMATCH_MATCHING_BATCH_PER_SOURCE",
        "SKUMATCH_THRESHOLDS_HIGH",
        "SKUMATCH_THRESHOLDS_LEGACY_HIGH",
        "SKUMATCH_THRESHOLDS_MEDIUM",
        "SKUMATCH_THRESHOLDS_ACCEPT",
        "SKUMATCH_THRESHOLDS_LEGACY_ACCEPT",
        "SKUMATCH_LOGGING_LEVEL",
        "SKUMATCH_LOGGING_FORMAT",
        "SKUMATCH_LOG_LEVEL",
        "SKUMATCH_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
