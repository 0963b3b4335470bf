//! Output formatting for the `inventory` command: table, JSON, YAML.
//!
//! Table uses `tabled`; structured formats serialize the resolved inventory
//! via serde. Credentials never appear in either.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use commando_config::{Device, Inventory};

use crate::cli::InventoryFormat;
use crate::error::CliError;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PLATFORM")]
    platform: String,
    #[tabled(rename = "ADDRESS")]
    address: String,
    #[tabled(rename = "USERNAME")]
    username: String,
    #[tabled(rename = "TRANSPORT")]
    transport: String,
    #[tabled(rename = "COMMANDS")]
    commands: String,
}

fn to_row(inventory: &Inventory, name: &str, device: &Device) -> DeviceRow {
    DeviceRow {
        name: name.to_owned(),
        platform: device.platform.clone(),
        address: device.address.clone(),
        username: inventory
            .shared_credentials()
            .map(|c| c.username.clone())
            .unwrap_or_default(),
        transport: device.transport.clone().unwrap_or_else(|| "-".into()),
        commands: device.send_commands.join("\n"),
    }
}

/// Render the inventory in the chosen format.
pub fn render_inventory(format: InventoryFormat, inventory: &Inventory) -> Result<String, CliError> {
    match format {
        InventoryFormat::Table => {
            let rows: Vec<DeviceRow> = inventory
                .devices
                .iter()
                .map(|(name, device)| to_row(inventory, name, device))
                .collect();
            Ok(Table::new(rows).with(Style::rounded()).to_string())
        }
        InventoryFormat::Json => serde_json::to_string_pretty(inventory)
            .map_err(|e| CliError::Serialize(e.to_string())),
        InventoryFormat::Yaml => {
            serde_yaml::to_string(inventory).map_err(|e| CliError::Serialize(e.to_string()))
        }
    }
}

/// Print rendered output to stdout.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use commando_config::{ResolveContext, resolve_flags};

    use super::*;

    fn inventory() -> Inventory {
        resolve_flags(&ResolveContext {
            platform: Some("cisco_iosxe".into()),
            username: Some("admin".into()),
            password: Some("hunter2".into()),
            address: Some("10.0.0.1".into()),
            commands: Some("show version::show clock".into()),
            ..ResolveContext::default()
        })
        .unwrap()
    }

    #[test]
    fn table_lists_devices_without_passwords() {
        let table = render_inventory(InventoryFormat::Table, &inventory()).unwrap();
        assert!(table.contains("10.0.0.1"));
        assert!(table.contains("cisco_iosxe"));
        assert!(table.contains("admin"));
        assert!(!table.contains("hunter2"));
    }

    #[test]
    fn json_omits_credentials() {
        let json = render_inventory(InventoryFormat::Json, &inventory()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["devices"]["10.0.0.1"]["send-commands"][1],
            "show clock"
        );
        assert!(value.get("credentials").is_none());
        assert!(!json.contains("hunter2"));
    }
}
