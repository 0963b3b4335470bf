//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string());
        }
        ConfigCommand::Show => {
            let settings = config::load_settings_or_default();
            let rendered = commando_config::settings::to_toml(&settings)?;
            output::print_output(rendered.trim_end());
        }
    }
    Ok(())
}
