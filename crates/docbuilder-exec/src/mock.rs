//! Mock process runner for testing.
//!
//! Provides [`MockRunner`] for exercising build logic without an installed
//! generator.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::runner::{ExecError, ProcessOutput, ProcessRunner};

/// A recorded [`ProcessRunner::run`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub cwd: PathBuf,
    pub args: Vec<String>,
}

/// Scripted runner that records its calls.
///
/// # Example
///
/// ```ignore
/// use docbuilder_exec::{MockRunner, ProcessRunner};
///
/// let runner = MockRunner::new()
///     .with_exit_code(1)
///     .with_output(["ERROR - Config value: 'theme'"]);
///
/// let output = runner.run(Path::new("docs"), &["build", "--clean"]).unwrap();
/// assert_eq!(runner.calls().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockRunner {
    code: i32,
    lines: Vec<String>,
    spawn_failure: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockRunner {
    /// Runner that succeeds with no output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit code reported by every run.
    #[must_use]
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }

    /// Output lines reported by every run.
    #[must_use]
    pub fn with_output<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Make every run fail as if the program could not be started.
    #[must_use]
    pub fn failing_to_spawn(mut self) -> Self {
        self.spawn_failure = true;
        self
    }

    /// Calls made so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, cwd: &Path, args: &[&str]) -> Result<ProcessOutput, ExecError> {
        self.calls.lock().unwrap().push(RecordedCall {
            cwd: cwd.to_path_buf(),
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
        });

        if self.spawn_failure {
            return Err(ExecError::Spawn {
                program: PathBuf::from("mock"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }

        Ok(ProcessOutput::with_code(self.code, self.lines.clone()))
    }
}
