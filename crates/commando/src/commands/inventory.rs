//! `inventory` handler: resolve and print the device set.

use crate::cli::{GlobalOpts, InventoryArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &InventoryArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let inventory = commando_config::resolve(&config::resolve_context(global))?;
    let rendered = output::render_inventory(args.format, &inventory)?;
    output::print_output(&rendered);
    Ok(())
}
