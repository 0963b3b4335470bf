// ── Tool settings ──
//
// Defaults for output handling, read from a TOML file and `COMMANDO_*`
// environment variables. CLI flags override whatever is loaded here.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use commando_core::{OutputMode, TimestampStyle};

use crate::error::ConfigError;

/// Top-level settings file.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub output: OutputMode,

    #[serde(default)]
    pub timestamp: TimestampStyle,

    /// Extension for per-command output files.
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default)]
    pub no_subfolder: bool,

    /// Directory the `outputs*` root is created in.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: OutputMode::default(),
            timestamp: TimestampStyle::default(),
            extension: default_extension(),
            no_subfolder: false,
            output_dir: default_output_dir(),
        }
    }
}

fn default_extension() -> String {
    "txt".into()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

// ── Settings file path ──────────────────────────────────────────────

/// Resolve the settings file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "commando", "commando").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("commando");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load settings from the canonical path plus environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&config_path())
}

/// Load settings from `path` plus environment. A missing file is not an
/// error; defaults apply.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("COMMANDO_").split("__"));

    let settings: Settings = figment.extract()?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Load settings, falling back to defaults when anything goes wrong.
pub fn load_settings_or_default() -> Settings {
    load_settings().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring unreadable settings");
        Settings::default()
    })
}

/// Render settings as TOML.
pub fn to_toml(settings: &Settings) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(settings)?)
}
