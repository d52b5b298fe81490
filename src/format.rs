//! Best-effort source formatting of rewritten text.
//!
//! The formatter reads the text on stdin and prints the result on stdout.
//! It never sees a file path, so formatters that follow module declarations
//! (like `rustfmt`) cannot reach any other file.

use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Edition passed to `rustfmt` unless configured otherwise.
pub const DEFAULT_EDITION: &str = "2021";

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("failed to spawn formatter `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to exchange text with formatter `{command}`: {source}")]
    Pipe {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter `{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("formatter `{command}` produced invalid UTF-8")]
    InvalidOutput { command: String },
}

/// External formatter invoked as `<command> <args..>` with the text on stdin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Formatter {
    pub command: String,
    pub args: Vec<String>,
    /// Extensions the formatter understands, without the leading dot
    pub extensions: Vec<String>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::rustfmt()
    }
}

impl Formatter {
    pub fn rustfmt() -> Self {
        Self {
            command: "rustfmt".to_string(),
            args: vec![
                "--edition".to_string(),
                DEFAULT_EDITION.to_string(),
                "--emit".to_string(),
                "stdout".to_string(),
            ],
            extensions: vec!["rs".to_string()],
        }
    }

    pub fn applies_to(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Pipe `text` through the formatter and return what it printed.
    ///
    /// Blocks until the formatter exits. Any non-zero exit is an error and
    /// the caller keeps the unformatted text.
    pub fn format(&self, text: &str) -> Result<String, FormatError> {
        let pipe_error = |source: std::io::Error| FormatError::Pipe {
            command: self.command.clone(),
            source,
        };

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FormatError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        // Feed stdin from a second thread; the formatter may start writing
        // before it has read everything.
        let stdin = child.stdin.take();
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (output, written)
        });
        let output = output.map_err(pipe_error)?;

        // A formatter that rejects its input may exit before reading all of it
        if !output.status.success() {
            return Err(FormatError::Failed {
                command: self.command.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(pipe_error)?;

        String::from_utf8(output.stdout).map_err(|_| FormatError::InvalidOutput {
            command: self.command.clone(),
        })
    }
}
