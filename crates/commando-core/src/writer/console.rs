// ── Console writer ──
//
// Banners and sub-headers go to the error stream, result text to the
// output stream, so `commando ... > file` captures only device output.

use std::io::{self, Write};

use owo_colors::{OwoColorize, Style};

use crate::error::CoreError;
use crate::response::Response;

use super::ResponseWriter;

const RULE: &str = "**************************";

pub struct ConsoleWriter<O, E> {
    out: O,
    err: E,
    color: bool,
}

impl ConsoleWriter<io::Stdout, io::Stderr> {
    /// Writer bound to the process stdout/stderr.
    pub fn stdio(color: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), color)
    }
}

impl<O: Write, E: Write> ConsoleWriter<O, E> {
    pub fn new(out: O, err: E, color: bool) -> Self {
        Self { out, err, color }
    }

    /// Give back the output and error streams.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_owned()
        }
    }

    fn write_failure(&mut self, name: &str) -> io::Result<()> {
        let banner = self.paint(
            &format!("\n{RULE}\n{name} failed\n{RULE}\n"),
            Style::new().red(),
        );
        write!(self.err, "{banner}")
    }

    fn write_success(&mut self, results: &[Response], name: &str) -> io::Result<()> {
        let banner = self.paint(&format!("\n{RULE}\n{name}\n{RULE}\n"), Style::new().green());
        write!(self.err, "{banner}")?;

        for response in results {
            match response {
                Response::Multi(multi) => {
                    for cmd in &multi.responses {
                        self.write_section(&cmd.input, &cmd.result, cmd.is_failed())?;
                    }
                }
                Response::Config(cfg) => {
                    self.write_section(&format!("cfg-{}", cfg.op), &cfg.result, cfg.is_failed())?;
                }
                Response::Diff(diff) => {
                    self.write_section("cfg-DiffConfig", &diff.device_diff, diff.is_failed())?;
                }
            }
        }
        self.out.flush()
    }

    fn write_section(&mut self, header: &str, body: &str, failed: bool) -> io::Result<()> {
        let header = self.paint(&format!("\n-- {header}:\n"), Style::new().bold());
        write!(self.err, "{header}")?;

        let body = if failed {
            self.paint(body, Style::new().red())
        } else {
            body.to_owned()
        };
        writeln!(self.out, "{body}")
    }
}

impl<O: Write, E: Write> ResponseWriter for ConsoleWriter<O, E> {
    fn write_response(
        &mut self,
        results: Option<&[Response]>,
        name: &str,
        _no_subfolder: bool,
        _file_ext: &str,
    ) -> Result<(), CoreError> {
        match results {
            None => self.write_failure(name),
            Some(results) => self.write_success(results, name),
        }
        .map_err(CoreError::Console)
    }
}
