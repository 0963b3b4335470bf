// ── Inventory document and resolved inventory ──
//
// The YAML document is parsed strictly: unknown keys anywhere in the
// devices or credentials sections are rejected. Transport profiles are
// opaque and carried through untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the credential set every device falls back to.
pub const DEFAULT_CREDENTIALS: &str = "default";

/// Separator for commands passed as a single string.
pub const COMMAND_DELIMITER: &str = "::";

/// Opaque connection settings, passed through to the execution layer.
pub type TransportProfile = serde_yaml::Value;

// ── Document types ──────────────────────────────────────────────────

/// A single addressable target.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Device {
    /// Command dialect, e.g. `cisco_iosxe` or `arista_eos`.
    #[serde(default)]
    pub platform: String,

    /// Required; a device without one is a parse error.
    pub address: String,

    /// Name of a `credentials` entry. Falls back to the default set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,

    /// Name of a `transports` entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,

    /// Commands to run, in order.
    #[serde(default, alias = "sendCommands")]
    pub send_commands: Vec<String>,

    /// Extra commands, one per line, appended after `send_commands`.
    #[serde(
        default,
        alias = "sendCommandsFromFile",
        skip_serializing_if = "Option::is_none"
    )]
    pub send_commands_from_file: Option<PathBuf>,
}

#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Enable / privileged-mode secret.
    #[serde(default, alias = "secondaryPassword")]
    pub secondary_password: String,
}

impl Credentials {
    /// Build a credential set whose secondary password mirrors the primary.
    pub fn with_shared_secret(username: impl Into<String>, password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            secondary_password: password.clone(),
            password,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"****")
            .field("secondary_password", &"****")
            .finish()
    }
}

/// The inventory file as written by the user, before any CLI overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryDocument {
    #[serde(default)]
    pub devices: BTreeMap<String, Device>,

    #[serde(default)]
    pub credentials: BTreeMap<String, Credentials>,

    #[serde(default)]
    pub transports: BTreeMap<String, TransportProfile>,

    /// Directory that relative `send-commands-from-file` paths resolve against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl InventoryDocument {
    /// Strictly parse an inventory held in memory.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        parse(yaml, "<inline>")
    }

    /// Read and strictly parse an inventory file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut doc = parse(&raw, &path.display().to_string())?;
        doc.base_dir = path.parent().map(Path::to_path_buf);

        tracing::debug!(
            path = %path.display(),
            devices = doc.devices.len(),
            credentials = doc.credentials.len(),
            transports = doc.transports.len(),
            "loaded inventory document"
        );
        Ok(doc)
    }
}

fn parse(yaml: &str, origin: &str) -> Result<InventoryDocument, ConfigError> {
    serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
        origin: origin.to_owned(),
        source,
    })
}

// ── Resolved inventory ──────────────────────────────────────────────

/// Devices, credentials and transports after CLI overrides were applied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Inventory {
    pub devices: BTreeMap<String, Device>,
    #[serde(skip)]
    pub credentials: BTreeMap<String, Credentials>,
    pub transports: BTreeMap<String, TransportProfile>,
}

impl Inventory {
    /// The credential set every device connects with. Resolution replaces
    /// all document credentials with the single default set, so a device's
    /// own `credentials` reference is not consulted.
    pub fn shared_credentials(&self) -> Option<&Credentials> {
        self.credentials.get(DEFAULT_CREDENTIALS)
    }

    pub fn transport_for(&self, device: &Device) -> Option<&TransportProfile> {
        device
            .transport
            .as_deref()
            .and_then(|name| self.transports.get(name))
    }
}

/// Split a `::`-joined command string into an ordered command list.
pub fn split_commands(commands: &str) -> Vec<String> {
    commands
        .split(COMMAND_DELIMITER)
        .map(str::to_owned)
        .collect()
}

/// Read a command file: one command per line, blank lines and `#` comments
/// skipped.
pub(crate) fn read_command_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}
