// ── File writer ──
//
// Layout: `<root>/<device>/<command><ext>`, or `<root>/<device>_<command><ext>`
// when subfolders are disabled. A failed write stops the remaining writes
// for that device; files already written stay on disk. Device names and op
// labels never leave the root: only the normal components of a name are
// kept, and op labels are sanitized like command names.

use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::CoreError;
use crate::response::Response;
use crate::sanitize::sanitize_file_name;

use super::ResponseWriter;

#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

pub struct FileWriter {
    root: PathBuf,
}

impl FileWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResponseWriter for FileWriter {
    fn write_response(
        &mut self,
        results: Option<&[Response]>,
        name: &str,
        no_subfolder: bool,
        file_ext: &str,
    ) -> Result<(), CoreError> {
        let device = device_path(name).ok_or_else(|| CoreError::UnsafeName {
            name: name.to_owned(),
        })?;
        let dir = if no_subfolder {
            device
                .parent()
                .map_or_else(|| self.root.clone(), |parent| self.root.join(parent))
        } else {
            self.root.join(&device)
        };
        create_dir(&dir)?;

        let Some(results) = results else {
            tracing::warn!(device = %name, "no results to write, device session failed");
            return Ok(());
        };

        let ext = normalize_extension(file_ext);
        let file_name = |base: &str| -> OsString {
            match device.file_name().filter(|_| no_subfolder) {
                Some(prefix) => {
                    let mut file = prefix.to_os_string();
                    file.push("_");
                    file.push(base);
                    file
                }
                None => base.into(),
            }
        };

        for response in results {
            match response {
                Response::Multi(multi) => {
                    for cmd in &multi.responses {
                        let base = format!("{}{ext}", sanitize_file_name(&cmd.input));
                        write_file(&dir.join(file_name(&base)), &cmd.result)?;
                    }
                }
                Response::Config(cfg) => {
                    let base = sanitize_file_name(&cfg.op);
                    write_file(&dir.join(file_name(&base)), &cfg.result)?;
                }
                Response::Diff(diff) => {
                    let base = sanitize_file_name(&diff.op);
                    write_file(&dir.join(file_name(&base)), &diff.report())?;
                }
            }
        }
        Ok(())
    }
}

/// Relative form of a device name. Root, prefix, `.` and `..` components
/// are dropped, so `/x/y` maps to `x/y` and `../r1` to `r1`. `None` when
/// nothing usable is left.
fn device_path(name: &str) -> Option<PathBuf> {
    let path: PathBuf = Path::new(name)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();
    (!path.as_os_str().is_empty()).then_some(path)
}

/// Sanitize an extension and make sure it starts with a dot.
fn normalize_extension(ext: &str) -> String {
    let ext = sanitize_file_name(ext);
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

fn create_dir(dir: &Path) -> Result<(), CoreError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir).map_err(|source| CoreError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), CoreError> {
    fs::write(path, contents).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote response");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::response::{CommandResponse, ConfigResponse, DiffResponse, MultiResponse};

    fn multi(cmds: &[(&str, &str)]) -> Response {
        Response::Multi(MultiResponse {
            responses: cmds
                .iter()
                .map(|(input, result)| CommandResponse {
                    input: (*input).into(),
                    result: (*result).into(),
                    failed: None,
                })
                .collect(),
        })
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn writes_command_output_into_device_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("outputs");
        let mut writer = FileWriter::new(&root);

        let results = [multi(&[("show ver", "IOS XE 17.9\n")])];
        writer
            .write_response(Some(&results), "r1", false, "txt")
            .unwrap();

        assert_eq!(read(&root.join("r1").join("show-ver.txt")), "IOS XE 17.9\n");
    }

    #[test]
    fn no_subfolder_prefixes_device_name() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("outputs");
        let mut writer = FileWriter::new(&root);

        let results = [multi(&[("show ver", "IOS XE 17.9\n")])];
        writer
            .write_response(Some(&results), "r1", true, "txt")
            .unwrap();

        assert_eq!(read(&root.join("r1_show-ver.txt")), "IOS XE 17.9\n");
        assert!(!root.join("r1").exists());
    }

    #[test]
    fn extension_is_sanitized_and_dotted() {
        assert_eq!(normalize_extension("txt"), ".txt");
        assert_eq!(normalize_extension(".log"), ".log");
        assert_eq!(normalize_extension(" c f g "), ".c-f-g");
    }

    #[test]
    fn failed_command_still_written_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let mut writer = FileWriter::new(tmp.path());

        let results = [Response::Multi(MultiResponse {
            responses: vec![CommandResponse {
                input: "show bogus".into(),
                result: "% Invalid input".into(),
                failed: Some("invalid command".into()),
            }],
        })];
        writer
            .write_response(Some(&results), "r1", false, "txt")
            .unwrap();

        assert_eq!(read(&tmp.path().join("r1/show-bogus.txt")), "% Invalid input");
    }

    #[test]
    fn config_response_has_no_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let mut writer = FileWriter::new(tmp.path());

        let results = [Response::Config(ConfigResponse {
            op: "CommitConfig".into(),
            result: "committed".into(),
            failed: None,
        })];
        writer
            .write_response(Some(&results), "r1", false, "txt")
            .unwrap();
        writer
            .write_response(Some(&results), "r2", true, "txt")
            .unwrap();

        assert_eq!(read(&tmp.path().join("r1/CommitConfig")), "committed");
        assert_eq!(read(&tmp.path().join("r2_CommitConfig")), "committed");
    }

    #[test]
    fn diff_response_writes_composite_report() {
        let tmp = tempfile::tempdir().unwrap();
        let mut writer = FileWriter::new(tmp.path());

        let diff = DiffResponse {
            device_diff: "+ ntp server 1.1.1.1".into(),
            source_config: "hostname r1\n".into(),
            candidate_config: "hostname r1\nntp server 1.1.1.1\n".into(),
            ..DiffResponse::default()
        };
        let expected = diff.report();
        writer
            .write_response(Some(&[Response::Diff(diff)]), "r1", false, "txt")
            .unwrap();

        let written = read(&tmp.path().join("r1/DiffConfig"));
        assert_eq!(written, expected);
        assert!(written.starts_with("Device Diff:\n+ ntp server 1.1.1.1"));
    }

    #[test]
    fn failed_session_creates_folder_only() {
        let tmp = tempfile::tempdir().unwrap();
        let mut writer = FileWriter::new(tmp.path());

        writer.write_response(None, "r1", false, "txt").unwrap();

        let dir = tmp.path().join("r1");
        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn write_failure_stops_and_keeps_earlier_files() {
        let tmp = tempfile::tempdir().unwrap();
        let mut writer = FileWriter::new(tmp.path());

        // A directory squatting on the second file name makes that write fail.
        fs::create_dir_all(tmp.path().join("r1/show-clock.txt")).unwrap();

        let results = [multi(&[
            ("show ver", "first"),
            ("show clock", "second"),
            ("show run", "third"),
        ])];
        let err = writer
            .write_response(Some(&results), "r1", false, "txt")
            .unwrap_err();

        match err {
            CoreError::Io { path, .. } => assert!(path.ends_with("r1/show-clock.txt")),
            other => panic!("expected Io error, got {other:?}"),
        }
        assert_eq!(read(&tmp.path().join("r1/show-ver.txt")), "first");
        assert!(!tmp.path().join("r1/show-run.txt").exists());
    }

    #[test]
    fn absolute_device_name_stays_under_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("outputs");
        let mut writer = FileWriter::new(&root);

        let outside = tmp.path().join("elsewhere");
        let name = outside.to_str().unwrap();
        let results = [multi(&[("show ver", "ok")])];
        writer
            .write_response(Some(&results), name, false, "txt")
            .unwrap();

        assert!(!outside.exists());
        let relative = device_path(name).unwrap();
        assert!(relative.is_relative());
        assert_eq!(read(&root.join(relative).join("show-ver.txt")), "ok");
    }

    #[test]
    fn parent_components_in_device_name_are_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("outputs");
        let mut writer = FileWriter::new(&root);

        let results = [multi(&[("show ver", "ok")])];
        writer
            .write_response(Some(&results), "../r1", false, "txt")
            .unwrap();
        writer
            .write_response(Some(&results), "../../r2", true, "txt")
            .unwrap();

        assert!(!tmp.path().join("r1").exists());
        assert_eq!(read(&root.join("r1/show-ver.txt")), "ok");
        assert_eq!(read(&root.join("r2_show-ver.txt")), "ok");
    }

    #[test]
    fn nested_device_name_without_subfolder_keeps_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let mut writer = FileWriter::new(tmp.path());

        let results = [multi(&[("show ver", "ok")])];
        writer
            .write_response(Some(&results), "/site/r1", true, "txt")
            .unwrap();

        assert_eq!(read(&tmp.path().join("site/r1_show-ver.txt")), "ok");
    }

    #[test]
    fn device_name_without_normal_components_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut writer = FileWriter::new(tmp.path());

        for name in ["..", "/", "./.."] {
            let err = writer.write_response(None, name, false, "txt").unwrap_err();
            assert!(matches!(err, CoreError::UnsafeName { .. }), "got {err:?}");
        }
    }

    #[test]
    fn op_label_cannot_traverse() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("outputs");
        let mut writer = FileWriter::new(&root);

        let results = [Response::Config(ConfigResponse {
            op: "../../escaped".into(),
            result: "committed".into(),
            failed: None,
        })];
        writer
            .write_response(Some(&results), "r1", false, "txt")
            .unwrap();

        assert!(!tmp.path().join("escaped").exists());
        assert_eq!(read(&root.join("r1/..-..-escaped")), "committed");
    }

    #[cfg(unix)]
    #[test]
    fn device_folder_is_not_group_or_world_writable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let mut writer = FileWriter::new(tmp.path().join("outputs"));
        writer.write_response(None, "r1", false, "txt").unwrap();

        let mode = fs::metadata(tmp.path().join("outputs/r1"))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode & 0o022, 0, "mode was {mode:o}");
        assert_eq!(mode & 0o700, 0o700, "mode was {mode:o}");
    }

    #[test]
    fn uncreatable_directory_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("outputs");
        fs::write(&blocker, "not a directory").unwrap();
        let mut writer = FileWriter::new(&blocker);

        let err = writer.write_response(Some(&[]), "r1", false, "txt").unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }), "got {err:?}");
    }
}
