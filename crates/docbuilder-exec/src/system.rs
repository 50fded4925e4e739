//! [`ProcessRunner`] backed by `std::process`.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::runner::{ExecError, ProcessOutput, ProcessRunner};

/// Runs a real executable.
///
/// Stdout and stderr share one pipe, so the captured lines keep the order in
/// which the program wrote them. The working directory is set on the child
/// only; the current process never changes directory.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    program: PathBuf,
}

impl SystemRunner {
    /// Runner for an explicit program path, used as given.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runner for `program`, looked up on `PATH` unless it contains a path
    /// separator.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::NotFound`] if a bare name is not on `PATH`.
    pub fn resolve(program: &str) -> Result<Self, ExecError> {
        let path = Path::new(program);
        if path.components().count() > 1 {
            return Ok(Self::new(path));
        }
        let resolved = which::which(program).map_err(|_| ExecError::NotFound {
            program: program.to_owned(),
        })?;
        tracing::debug!(program, resolved = %resolved.display(), "resolved generator");
        Ok(Self::new(resolved))
    }

    /// Program this runner executes.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, cwd: &Path, args: &[&str]) -> Result<ProcessOutput, ExecError> {
        let spawn_error = |source| ExecError::Spawn {
            program: self.program.clone(),
            source,
        };

        tracing::debug!(
            program = %self.program.display(),
            cwd = %cwd.display(),
            ?args,
            "running generator"
        );

        let (mut reader, writer) = std::io::pipe().map_err(spawn_error)?;
        let mut child = {
            let mut command = Command::new(&self.program);
            command
                .args(args)
                .current_dir(cwd)
                .stdin(Stdio::null())
                .stdout(writer.try_clone().map_err(spawn_error)?)
                .stderr(writer);
            // The command holds the parent's copies of the write end; it must
            // be dropped before reading or the read never sees EOF.
            command.spawn().map_err(spawn_error)?
        };

        let mut raw = Vec::new();
        let read = reader.read_to_end(&mut raw);
        let status = child.wait().map_err(spawn_error)?;
        read.map_err(spawn_error)?;

        let lines = String::from_utf8_lossy(&raw)
            .lines()
            .map(str::to_owned)
            .collect();
        let output = ProcessOutput {
            code: status.code(),
            lines,
        };

        tracing::debug!(code = ?output.code, lines = output.lines.len(), "generator finished");
        Ok(output)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sh() -> SystemRunner {
        SystemRunner::resolve("sh").unwrap()
    }

    #[test]
    fn test_resolve_finds_program_on_path() {
        let runner = sh();
        assert!(runner.program().is_absolute());
        assert!(runner.program().ends_with("sh"));
    }

    #[test]
    fn test_resolve_missing_program() {
        let err = SystemRunner::resolve("docbuilder-no-such-program").unwrap_err();
        assert!(matches!(err, ExecError::NotFound { .. }));
    }

    #[test]
    fn test_resolve_keeps_explicit_path() {
        let runner = SystemRunner::resolve("./venv/bin/mkdocs").unwrap();
        assert_eq!(runner.program(), Path::new("./venv/bin/mkdocs"));
    }

    #[test]
    fn test_run_merges_stderr_into_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let output = sh()
            .run(
                dir.path(),
                &["-c", "echo building; echo 'WARNING - missing nav' 1>&2; echo done"],
            )
            .unwrap();

        assert!(output.success());
        assert_eq!(output.lines, vec!["building", "WARNING - missing nav", "done"]);
    }

    #[test]
    fn test_run_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let output = sh()
            .run(dir.path(), &["-c", "echo 'Config file not found' 1>&2; exit 3"])
            .unwrap();

        assert_eq!(output.code, Some(3));
        assert!(!output.success());
        assert_eq!(output.lines, vec!["Config file not found"]);
    }

    #[test]
    fn test_run_uses_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();

        let output = sh().run(dir.path(), &["-c", "cat marker.txt"]).unwrap();

        assert_eq!(output.lines, vec!["here"]);
    }

    #[test]
    fn test_run_missing_binary_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = SystemRunner::new(dir.path().join("mkdocs"));
        let err = runner.run(dir.path(), &["build", "--clean"]).unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }
}
