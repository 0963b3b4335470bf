//! Inventory resolution and settings for the commando CLI.
//!
//! Turns an inventory document or a handful of CLI values into a validated
//! [`Inventory`]: device filtering, command and credential overrides, and
//! the required-field checks for single-device runs. Also loads the tool's
//! own TOML settings.

pub mod error;
pub mod inventory;
pub mod resolve;
pub mod settings;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::ConfigError;
pub use inventory::{
    COMMAND_DELIMITER, Credentials, DEFAULT_CREDENTIALS, Device, Inventory, InventoryDocument,
    TransportProfile, split_commands,
};
pub use resolve::{ResolveContext, filter_devices, resolve, resolve_document, resolve_flags};
pub use settings::{
    Defaults, Settings, config_path, load_settings, load_settings_from, load_settings_or_default,
};
