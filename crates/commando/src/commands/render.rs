//! `render` handler: replay captured results through the selected writer.
//!
//! Every resolved device gets exactly one writer call. A device missing
//! from the results file, or mapped to `null`, is rendered as a failed
//! session. A write failure for one device does not stop the others; the
//! first failure is reported once all devices were attempted.

use std::collections::BTreeMap;
use std::path::Path;

use commando_core::{Response, new_response_writer};

use crate::cli::{GlobalOpts, RenderArgs};
use crate::config;
use crate::error::CliError;

/// Captured results keyed by device name.
type Captured = BTreeMap<String, Option<Vec<Response>>>;

pub fn handle(args: &RenderArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let inventory = commando_config::resolve(&config::resolve_context(global))?;
    let mut captured = load_results(&args.results)?;

    let settings = config::load_settings_or_default();
    let plan = config::output_plan(global, &settings);
    let (mut writer, root) = new_response_writer(plan.mode, &plan.writer);

    let mut failures = Vec::new();
    for name in inventory.devices.keys() {
        let results = captured.remove(name).flatten();
        if results.is_none() {
            tracing::debug!(device = %name, "no results captured, rendering as failed");
        }

        if let Err(source) =
            writer.write_response(results.as_deref(), name, plan.no_subfolder, &plan.file_ext)
        {
            tracing::error!(device = %name, error = %source, "failed to write device output");
            failures.push(CliError::Write {
                device: name.clone(),
                source,
            });
        }
    }

    if !captured.is_empty() {
        let skipped: Vec<_> = captured.keys().map(String::as_str).collect();
        tracing::info!(?skipped, "results for devices outside the inventory were ignored");
    }

    if let Some(root) = root {
        eprintln!("outputs written to {}", root.display());
    }

    match failures.into_iter().next() {
        Some(first) => Err(first),
        None => Ok(()),
    }
}

/// Parse a results file. `.json` files go through serde_json, anything
/// else through serde_yaml.
fn load_results(path: &Path) -> Result<Captured, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed: Result<Captured, String> = if is_json {
        serde_json::from_str(&raw).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&raw).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| CliError::Results {
        path: path.to_path_buf(),
        reason,
    })
}
