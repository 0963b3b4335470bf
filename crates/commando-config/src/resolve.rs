// ── Inventory resolution ──
//
// Two entry paths: an inventory document reconciled against CLI
// overrides, or a single device built from CLI values alone. Both return
// an `Inventory` value; nothing here mutates shared state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::inventory::{
    Credentials, DEFAULT_CREDENTIALS, Device, Inventory, InventoryDocument, read_command_file,
    split_commands,
};

/// CLI-supplied values that drive resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    pub inventory: Option<PathBuf>,
    /// Regular expression matched against device names.
    pub filter: Option<String>,
    pub platform: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
    /// `::`-joined command list.
    pub commands: Option<String>,
}

/// Resolve from the inventory file when one is set, from CLI values otherwise.
pub fn resolve(ctx: &ResolveContext) -> Result<Inventory, ConfigError> {
    match ctx.inventory.as_deref() {
        Some(path) => {
            let doc = InventoryDocument::load(path)?;
            resolve_document(doc, ctx)
        }
        None => resolve_flags(ctx),
    }
}

/// Reconcile a parsed inventory document with the CLI overrides.
///
/// The returned inventory always holds exactly one credential set, stored
/// under [`DEFAULT_CREDENTIALS`] and built from the CLI username/password,
/// even when those are empty. Document credentials are discarded.
pub fn resolve_document(
    doc: InventoryDocument,
    ctx: &ResolveContext,
) -> Result<Inventory, ConfigError> {
    let InventoryDocument {
        mut devices,
        credentials: declared,
        transports,
        base_dir,
    } = doc;

    filter_devices(&mut devices, ctx.filter.as_deref())?;

    if devices.is_empty() {
        return Err(ConfigError::NoDevices);
    }

    if let Some(commands) = non_empty(ctx.commands.as_ref()) {
        let commands = split_commands(commands);
        tracing::debug!(
            count = commands.len(),
            "CLI commands override inventory commands"
        );
        for device in devices.values_mut() {
            device.send_commands.clone_from(&commands);
        }
    } else {
        load_command_files(&mut devices, base_dir.as_deref())?;
    }

    if !declared.is_empty() {
        tracing::debug!(
            discarded = declared.len(),
            "inventory credentials replaced by CLI credentials"
        );
    }

    tracing::info!(devices = devices.len(), "resolved inventory");

    Ok(Inventory {
        devices,
        credentials: default_credentials(ctx),
        transports,
    })
}

/// Build a single-device inventory from CLI values alone.
///
/// Required values are checked in order and the first missing one is
/// reported.
pub fn resolve_flags(ctx: &ResolveContext) -> Result<Inventory, ConfigError> {
    let platform = non_empty(ctx.platform.as_ref()).ok_or(ConfigError::NoPlatform)?;
    non_empty(ctx.username.as_ref()).ok_or(ConfigError::NoUsername)?;
    non_empty(ctx.password.as_ref()).ok_or(ConfigError::NoPassword)?;
    let commands = non_empty(ctx.commands.as_ref()).ok_or(ConfigError::NoCommands)?;
    let address = non_empty(ctx.address.as_ref()).ok_or(ConfigError::NoAddress)?;

    let device = Device {
        platform: platform.to_owned(),
        address: address.to_owned(),
        send_commands: split_commands(commands),
        ..Device::default()
    };

    tracing::info!(%address, %platform, "resolved single device from flags");

    Ok(Inventory {
        devices: BTreeMap::from([(address.to_owned(), device)]),
        credentials: default_credentials(ctx),
        transports: BTreeMap::new(),
    })
}

/// Drop every device whose name does not match `filter`. An empty filter
/// keeps everything.
pub fn filter_devices(
    devices: &mut BTreeMap<String, Device>,
    filter: Option<&str>,
) -> Result<(), ConfigError> {
    let Some(pattern) = filter.filter(|f| !f.is_empty()) else {
        return Ok(());
    };

    let re = Regex::new(pattern).map_err(|source| ConfigError::InvalidFilter {
        pattern: pattern.to_owned(),
        source,
    })?;

    let before = devices.len();
    devices.retain(|name, _| re.is_match(name));
    tracing::debug!(
        %pattern,
        kept = devices.len(),
        removed = before - devices.len(),
        "applied device filter"
    );
    Ok(())
}

fn load_command_files(
    devices: &mut BTreeMap<String, Device>,
    base_dir: Option<&Path>,
) -> Result<(), ConfigError> {
    for (name, device) in devices.iter_mut() {
        let Some(file) = device.send_commands_from_file.as_ref() else {
            continue;
        };
        let path = match base_dir {
            Some(base) if file.is_relative() => base.join(file),
            _ => file.clone(),
        };
        let commands = read_command_file(&path)?;
        tracing::debug!(device = %name, path = %path.display(), count = commands.len(), "loaded commands from file");
        device.send_commands.extend(commands);
    }
    Ok(())
}

fn default_credentials(ctx: &ResolveContext) -> BTreeMap<String, Credentials> {
    let username = ctx.username.clone().unwrap_or_default();
    let password = ctx.password.clone().unwrap_or_default();
    BTreeMap::from([(
        DEFAULT_CREDENTIALS.to_owned(),
        Credentials::with_shared_secret(username, password),
    )])
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}
