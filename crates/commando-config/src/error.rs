// ── Config error types ──
//
// Every inventory resolution failure is returned to the caller. Nothing in
// this crate terminates the process.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for inventory resolution and settings loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    // ── Validation ──────────────────────────────────────────────────
    #[error("no devices left to run against")]
    NoDevices,

    #[error("platform is not set")]
    NoPlatform,

    #[error("username is not set")]
    NoUsername,

    #[error("password is not set")]
    NoPassword,

    #[error("commands are not set")]
    NoCommands,

    #[error("address is not set")]
    NoAddress,

    #[error("invalid device filter '{pattern}'")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // ── Inventory document ──────────────────────────────────────────
    #[error("failed to parse inventory {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Settings ────────────────────────────────────────────────────
    #[error("failed to serialize settings: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("settings loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
