pub mod analyze;
pub mod config;
pub mod suggest;

use serde::Serialize;
use skumatch_core::errors::ApplicationError;

pub const EXIT_CONFIGURATION: u8 = 2;
pub const EXIT_CATALOG: u8 = 3;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl CommandResult {
    /// Successful run whose output is a command-specific JSON document.
    pub fn report<T: Serialize>(command: &str, report: &T) -> Self {
        match serde_json::to_string_pretty(report) {
            Ok(output) => Self { exit_code: 0, output },
            Err(error) => Self::failure(
                command,
                "serialization",
                format!("failed to serialize {command} report: {error}"),
                1,
            ),
        }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        Self::with_hint(command, error_class, message.into(), None, exit_code)
    }

    /// Failure payload that also carries the operator-facing hint for the error class.
    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Configuration(_) => EXIT_CONFIGURATION,
            ApplicationError::Catalog { .. } => EXIT_CATALOG,
        };
        Self::with_hint(
            command,
            error.error_class(),
            error.to_string(),
            Some(error.user_message().to_string()),
            exit_code,
        )
    }

    fn with_hint(
        command: &str,
        error_class: &str,
        message: String,
        hint: Option<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message,
            hint,
        };
        Self { exit_code, output: serialize_payload(&payload) }
    }
}

fn serialize_payload(payload: &CommandOutcome) -> String {
    serde_json::to_string(payload)
        .unwrap_or_else(|error| fallback_payload(&payload.command, &error.to_string()))
}

fn fallback_payload(command: &str, message: &str) -> String {
    format!(
        "{{\"command\":\"{}\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
        escape_json(command),
        escape_json(message)
    )
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
