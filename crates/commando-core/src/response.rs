// ── Result objects ──
//
// What the execution layer hands back for one device. The writer matches
// on `Response` exhaustively, so a new result kind is a compile error in
// every writer until it is handled.

use serde::{Deserialize, Serialize};

use crate::diff;

/// One result object produced for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Output of a batch of show/exec commands.
    Multi(MultiResponse),
    /// Outcome of a configuration operation (load, commit, abort, ...).
    Config(ConfigResponse),
    /// Outcome of a configuration diff.
    Diff(DiffResponse),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiResponse {
    pub responses: Vec<CommandResponse>,
}

/// A single command and what the device printed for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub input: String,
    #[serde(default)]
    pub result: String,
    /// Failure reason, when the device reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<String>,
}

impl CommandResponse {
    pub fn is_failed(&self) -> bool {
        self.failed.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    /// Operation name, e.g. `LoadConfig` or `CommitConfig`.
    pub op: String,
    #[serde(default)]
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<String>,
}

impl ConfigResponse {
    pub fn is_failed(&self) -> bool {
        self.failed.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResponse {
    #[serde(default = "default_diff_op")]
    pub op: String,
    /// Diff as reported by the device itself.
    #[serde(default)]
    pub device_diff: String,
    /// Running configuration before the change.
    #[serde(default)]
    pub source_config: String,
    /// Candidate configuration.
    #[serde(default)]
    pub candidate_config: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<String>,
}

fn default_diff_op() -> String {
    "DiffConfig".into()
}

impl Default for DiffResponse {
    fn default() -> Self {
        Self {
            op: default_diff_op(),
            device_diff: String::new(),
            source_config: String::new(),
            candidate_config: String::new(),
            failed: None,
        }
    }
}

impl DiffResponse {
    pub fn is_failed(&self) -> bool {
        self.failed.is_some()
    }

    pub fn side_by_side_diff(&self) -> String {
        diff::side_by_side(&self.source_config, &self.candidate_config)
    }

    pub fn unified_diff(&self) -> String {
        diff::unified(&self.source_config, &self.candidate_config)
    }

    /// Device diff followed by the side-by-side and unified renderings.
    pub fn report(&self) -> String {
        format!(
            "Device Diff:\n{}\n\nSide By Side Diff:\n{}\n\nUnified Diff:\n{}",
            self.device_diff,
            self.side_by_side_diff(),
            self.unified_diff()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn responses_deserialize_by_tag() {
        let json = r#"[
            {"type": "multi", "responses": [{"input": "show ver", "result": "IOS XE"}]},
            {"type": "config", "op": "CommitConfig", "result": "ok", "failed": "timeout"},
            {"type": "diff", "device_diff": "+ hostname r2"}
        ]"#;
        let parsed: Vec<Response> = serde_json::from_str(json).unwrap();

        let Response::Multi(multi) = &parsed[0] else {
            panic!("expected multi, got {:?}", parsed[0]);
        };
        assert_eq!(multi.responses[0].input, "show ver");
        assert!(!multi.responses[0].is_failed());

        let Response::Config(cfg) = &parsed[1] else {
            panic!("expected config, got {:?}", parsed[1]);
        };
        assert!(cfg.is_failed());

        let Response::Diff(diff) = &parsed[2] else {
            panic!("expected diff, got {:?}", parsed[2]);
        };
        assert_eq!(diff.op, "DiffConfig");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let json = r#"{"type": "telemetry"}"#;
        assert!(serde_json::from_str::<Response>(json).is_err());
    }

    #[test]
    fn diff_report_has_all_sections() {
        let diff = DiffResponse {
            device_diff: "+ ntp server 1.1.1.1".into(),
            source_config: "hostname r1\n".into(),
            candidate_config: "hostname r1\nntp server 1.1.1.1\n".into(),
            ..DiffResponse::default()
        };
        let report = diff.report();

        assert!(report.starts_with("Device Diff:\n+ ntp server 1.1.1.1\n\n"));
        assert!(report.contains("\n\nSide By Side Diff:\n"));
        assert!(report.contains("\n\nUnified Diff:\n--- source\n+++ candidate\n"));
        assert!(report.ends_with("+ntp server 1.1.1.1\n"));
    }
}
