//! Clap derive structures for the `commando` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// commando -- run commands against many network devices at once
#[derive(Debug, Parser)]
#[command(
    name = "commando",
    version,
    about = "Run commands against network devices and collect the output",
    long_about = "Resolves target devices from an inventory file or from flags, and\n\
        renders per-device command output to the terminal or to a tree of files.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Inventory file (YAML) with devices, credentials and transports
    #[arg(long, short = 'i', env = "COMMANDO_INVENTORY", global = true)]
    pub inventory: Option<PathBuf>,

    /// Only keep devices whose name matches this regular expression
    #[arg(long, short = 'f', global = true)]
    pub filter: Option<String>,

    /// Device platform, e.g. cisco_iosxe (single-device mode)
    #[arg(long, global = true)]
    pub platform: Option<String>,

    /// Username for every device
    #[arg(long, short = 'u', env = "COMMANDO_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for every device (also used as the secondary password)
    #[arg(long, short = 'p', env = "COMMANDO_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Device address (single-device mode)
    #[arg(long, short = 'a', global = true)]
    pub address: Option<String>,

    /// Commands to send, joined with '::'
    #[arg(long, short = 'c', global = true)]
    pub commands: Option<String>,

    /// Where to send device output
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputArg>,

    /// Append an RFC 3339 timestamp to the output directory name
    #[arg(long, global = true, conflicts_with = "timestamp_simple")]
    pub timestamp: bool,

    /// Append a timestamp without ':' to the output directory name
    #[arg(long, global = true)]
    pub timestamp_simple: bool,

    /// Write all devices into one directory with device-prefixed file names
    #[arg(long, global = true)]
    pub no_subfolder: bool,

    /// Extension for per-command output files
    #[arg(long, short = 'e', global = true)]
    pub file_ext: Option<String>,

    /// Directory the output directory is created in
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputArg {
    /// Print to the terminal
    Stdout,
    /// Write files under the output directory
    File,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InventoryFormat {
    /// Pretty table
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the resolved inventory
    #[command(alias = "inv")]
    Inventory(InventoryArgs),

    /// Render captured device results to the terminal or to files
    Render(RenderArgs),

    /// Inspect commando settings
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct InventoryArgs {
    /// Output format
    #[arg(long, default_value = "table")]
    pub format: InventoryFormat,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// JSON or YAML file mapping device names to their results
    #[arg(long, short = 'r')]
    pub results: PathBuf,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the settings file location
    Path,

    /// Display the effective settings
    Show,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
