//! CLI error types with miette diagnostics.
//!
//! Maps `ConfigError` and `CoreError` into user-facing errors with
//! actionable help text and a process exit code.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use commando_config::ConfigError;
use commando_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const IO: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Missing input ────────────────────────────────────────────────
    #[error("No devices to run against")]
    #[diagnostic(
        code(commando::no_devices),
        help("Check the inventory's devices section and the --filter pattern.")
    )]
    NoDevices,

    #[error("Missing {field}")]
    #[diagnostic(
        code(commando::missing_input),
        help(
            "Without --inventory, commando needs --platform, --username, --password,\n\
             --commands and --address. Missing: --{field}"
        )
    )]
    MissingInput { field: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(commando::validation))]
    Validation { field: String, reason: String },

    // ── Inventory / settings ─────────────────────────────────────────
    #[error("Could not parse inventory {origin}")]
    #[diagnostic(
        code(commando::inventory_parse),
        help("Unknown keys are rejected. Allowed top-level keys: devices, credentials, transports.")
    )]
    InventoryParse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Could not read results file {}: {reason}", path.display())]
    #[diagnostic(
        code(commando::results),
        help("Expected a JSON or YAML map of device name to a list of results or null.")
    )]
    Results {
        path: PathBuf,
        reason: String,
    },

    #[error(transparent)]
    #[diagnostic(code(commando::settings))]
    Settings(ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error("I/O error on {}", path.display())]
    #[diagnostic(code(commando::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write output for {device}")]
    #[diagnostic(code(commando::write_failed))]
    Write {
        device: String,
        #[source]
        source: CoreError,
    },

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(commando::serialize))]
    Serialize(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoDevices | Self::MissingInput { .. } | Self::Validation { .. } => {
                exit_code::USAGE
            }
            Self::InventoryParse { .. } | Self::Results { .. } | Self::Settings(_) => {
                exit_code::CONFIG
            }
            Self::Io { .. } | Self::Write { .. } => exit_code::IO,
            Self::Serialize(_) => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoDevices => CliError::NoDevices,
            ConfigError::NoPlatform => missing("platform"),
            ConfigError::NoUsername => missing("username"),
            ConfigError::NoPassword => missing("password"),
            ConfigError::NoCommands => missing("commands"),
            ConfigError::NoAddress => missing("address"),
            ConfigError::InvalidFilter { pattern, source } => CliError::Validation {
                field: "filter".into(),
                reason: format!("'{pattern}' is not a valid regular expression: {source}"),
            },
            ConfigError::Parse { origin, source } => CliError::InventoryParse { origin, source },
            ConfigError::Io { path, source } => CliError::Io { path, source },
            other @ (ConfigError::Serialization(_) | ConfigError::Figment(_)) => {
                CliError::Settings(other)
            }
        }
    }
}

fn missing(field: &str) -> CliError {
    CliError::MissingInput {
        field: field.into(),
    }
}
