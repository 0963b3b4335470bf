//! CLI configuration -- thin wrapper around `commando_config`.
//!
//! Merges loaded settings with `GlobalOpts` flag overrides and builds the
//! resolution context and writer options.

use std::io::{self, IsTerminal};

use commando_config::{ResolveContext, Settings};
use commando_core::{OutputMode, TimestampStyle, WriterOptions};

use crate::cli::{ColorMode, GlobalOpts, OutputArg};

pub use commando_config::{config_path, load_settings_or_default};

/// Output handling after flags were laid over the settings file.
#[derive(Debug, Clone)]
pub struct OutputPlan {
    pub mode: OutputMode,
    pub writer: WriterOptions,
    pub no_subfolder: bool,
    pub file_ext: String,
}

/// Values the inventory resolver needs, taken straight from the flags.
pub fn resolve_context(global: &GlobalOpts) -> ResolveContext {
    ResolveContext {
        inventory: global.inventory.clone(),
        filter: global.filter.clone(),
        platform: global.platform.clone(),
        username: global.username.clone(),
        password: global.password.clone(),
        address: global.address.clone(),
        commands: global.commands.clone(),
    }
}

/// Flags win over settings; unset flags fall back to the settings file.
pub fn output_plan(global: &GlobalOpts, settings: &Settings) -> OutputPlan {
    let defaults = &settings.defaults;

    let mode = match global.output {
        Some(OutputArg::Stdout) => OutputMode::Stdout,
        Some(OutputArg::File) => OutputMode::File,
        None => defaults.output,
    };

    let timestamp = if global.timestamp || global.timestamp_simple {
        TimestampStyle::from_flags(global.timestamp, global.timestamp_simple)
    } else {
        defaults.timestamp
    };

    OutputPlan {
        mode,
        writer: WriterOptions {
            timestamp,
            parent_dir: global
                .output_dir
                .clone()
                .unwrap_or_else(|| defaults.output_dir.clone()),
            color: should_color(global.color),
        },
        no_subfolder: global.no_subfolder || defaults.no_subfolder,
        file_ext: global
            .file_ext
            .clone()
            .unwrap_or_else(|| defaults.extension.clone()),
    }
}

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}
