// ── Core error types ──
//
// Writers fail on I/O or on a device name with no usable path. File errors carry the path that failed so the
// caller can report which device output was left incomplete.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("device name {name:?} does not map to a path under the output root")]
    UnsafeName { name: String },

    #[error("failed to write to the console: {0}")]
    Console(#[source] std::io::Error),
}
