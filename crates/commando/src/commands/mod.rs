//! Command dispatch: bridges CLI args -> resolver/writers -> output.

pub mod config_cmd;
pub mod inventory;
pub mod render;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an inventory-bound command to its handler.
pub fn dispatch(cmd: &Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Inventory(args) => inventory::handle(args, global),
        Command::Render(args) => render::handle(args, global),
        Command::Config(args) => config_cmd::handle(args),
        // Completions are handled before dispatch
        Command::Completions(_) => Ok(()),
    }
}
