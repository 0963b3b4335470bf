// commando-core: result model and response writers.

pub mod diff;
pub mod error;
pub mod response;
pub mod sanitize;
pub mod writer;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use response::{CommandResponse, ConfigResponse, DiffResponse, MultiResponse, Response};
pub use sanitize::sanitize_file_name;
pub use writer::{
    ConsoleWriter, FileWriter, OUTPUT_BASE, OutputMode, ResponseWriter, TimestampStyle,
    WriterOptions, new_response_writer, output_root_name,
};
