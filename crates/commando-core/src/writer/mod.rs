//! Response writers: console rendering and on-disk output trees.
//!
//! One [`ResponseWriter`] is chosen at startup from the output mode and is
//! then called once per device, whether its session succeeded or not.

mod console;
mod file;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::response::Response;

pub use console::ConsoleWriter;
pub use file::FileWriter;

/// Base name of the output root directory.
pub const OUTPUT_BASE: &str = "outputs";

/// Renders or persists the results of one device.
pub trait ResponseWriter {
    /// `results` is `None` when the device session failed outright.
    /// `no_subfolder` flattens output into the root with device-prefixed
    /// file names; `file_ext` applies to per-command files only.
    fn write_response(
        &mut self,
        results: Option<&[Response]>,
        name: &str,
        no_subfolder: bool,
        file_ext: &str,
    ) -> Result<(), CoreError>;
}

// ── Selection ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Print to the terminal.
    #[default]
    Stdout,
    /// Write a directory tree under the output root.
    File,
}

/// Suffix appended to the output root name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampStyle {
    /// Plain `outputs`; repeated runs share and overwrite it.
    #[default]
    None,
    /// `outputs_2024-05-01T10:20:30+02:00`
    Rfc3339,
    /// RFC 3339 with the colons removed.
    Compact,
}

impl TimestampStyle {
    /// Map the two CLI switches to a style. The compact switch wins.
    pub fn from_flags(timestamp: bool, simple: bool) -> Self {
        if simple {
            Self::Compact
        } else if timestamp {
            Self::Rfc3339
        } else {
            Self::None
        }
    }
}

#[derive(Debug, Clone)]
pub struct WriterOptions {
    pub timestamp: TimestampStyle,
    /// Directory the output root is created in.
    pub parent_dir: PathBuf,
    /// Emit ANSI colors on the console.
    pub color: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            timestamp: TimestampStyle::None,
            parent_dir: PathBuf::from("."),
            color: false,
        }
    }
}

/// Name of the output root for a run started at `now`.
pub fn output_root_name<Tz>(style: TimestampStyle, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match style {
        TimestampStyle::None => OUTPUT_BASE.to_owned(),
        TimestampStyle::Rfc3339 => {
            format!("{OUTPUT_BASE}_{}", now.to_rfc3339_opts(SecondsFormat::Secs, true))
        }
        TimestampStyle::Compact => format!(
            "{OUTPUT_BASE}_{}",
            now.to_rfc3339_opts(SecondsFormat::Secs, true).replace(':', "")
        ),
    }
}

/// Build the writer for `mode`. In file mode the output root is fixed
/// here, once, and returned so the caller can report it.
pub fn new_response_writer(
    mode: OutputMode,
    opts: &WriterOptions,
) -> (Box<dyn ResponseWriter>, Option<PathBuf>) {
    match mode {
        OutputMode::Stdout => (Box::new(ConsoleWriter::stdio(opts.color)), None),
        OutputMode::File => {
            let root = output_root(&opts.parent_dir, opts.timestamp, &Local::now());
            tracing::debug!(root = %root.display(), "writing responses to files");
            (Box::new(FileWriter::new(root.clone())), Some(root))
        }
    }
}

fn output_root<Tz>(parent: &Path, style: TimestampStyle, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    parent.join(output_root_name(style, now))
}
