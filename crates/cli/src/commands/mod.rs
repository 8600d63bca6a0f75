pub mod browse;
pub mod config;
pub mod recommend;
pub mod search;
pub mod simulate;

use basket_core::config::{AppConfig, ConfigError, LoadOptions};
use basket_core::errors::{ApplicationError, DomainError};
use serde::Serialize;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_RUNTIME: u8 = 3;
pub const EXIT_DOMAIN: u8 = 4;

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
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Successful command with a command-specific JSON report.
    pub fn report<T: Serialize>(command: &str, report: &T) -> Self {
        match serde_json::to_string(report) {
            Ok(output) => Self { exit_code: 0, output },
            Err(error) => Self::failure(
                command,
                "serialization",
                format!("failed to render report: {error}"),
                1,
            ),
        }
    }

    pub fn from_config_error(command: &str, error: &ConfigError) -> Self {
        Self::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            EXIT_CONFIG,
        )
    }

    pub fn from_domain_error(command: &str, error: &DomainError) -> Self {
        Self::failure(
            command,
            "domain_validation",
            format!("{} ({error})", error.user_message()),
            EXIT_DOMAIN,
        )
    }

    pub fn from_application_error(command: &str, error: &ApplicationError) -> Self {
        match error {
            ApplicationError::Domain(error) => Self::from_domain_error(command, error),
            ApplicationError::Configuration(_) => {
                Self::failure(command, error.error_class(), error.to_string(), EXIT_CONFIG)
            }
            ApplicationError::Scheduler(_) => {
                Self::failure(command, error.error_class(), error.to_string(), EXIT_RUNTIME)
            }
        }
    }
}

pub(crate) fn load_config(
    command: &str,
    options: &LoadOptions,
) -> Result<AppConfig, CommandResult> {
    AppConfig::load(options.clone())
        .map_err(|error| CommandResult::from_config_error(command, &error))
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            concat!(
                "{{\"command\":\"unknown\",\"status\":\"error\",",
                "\"error_class\":\"serialization\",\"message\":\"{}\"}}"
            ),
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
