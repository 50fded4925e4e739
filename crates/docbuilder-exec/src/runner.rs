//! Process runner trait and error types.

use std::path::{Path, PathBuf};

/// Runs an external program and captures its output.
///
/// Implementations run the program to completion in `cwd` with `args` and
/// return its exit status together with everything it wrote to stdout and
/// stderr, as lines in the order they were written.
pub trait ProcessRunner: Send + Sync {
    /// Run the program.
    ///
    /// A non-zero exit is not an error here; it is reported through
    /// [`ProcessOutput::code`].
    ///
    /// # Errors
    ///
    /// Returns [`ExecError`] if the program cannot be found or started.
    fn run(&self, cwd: &Path, args: &[&str]) -> Result<ProcessOutput, ExecError>;
}

/// Exit status and combined output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    /// Combined stdout and stderr lines, without line terminators.
    pub lines: Vec<String>,
}

impl ProcessOutput {
    /// Output of a process that exited with `code`.
    #[must_use]
    pub fn with_code(code: i32, lines: Vec<String>) -> Self {
        Self {
            code: Some(code),
            lines,
        }
    }

    /// True if the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Error starting an external program.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// Program could not be resolved on `PATH`.
    #[error("{program} not found in PATH")]
    NotFound { program: String },
    /// Program could not be spawned or its output could not be read.
    #[error("failed to run {}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
