//! Writes `mkdocs.yml` and runs the MkDocs build.

use std::fs::DirBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use docbuilder_config::{
    ConfigError, DEFAULT_DOCS_DIR, DEFAULT_GENERATOR, MKDOCS_FILENAME, MkDocsConfig,
    MkDocsOverrides,
};
use docbuilder_exec::{ExecError, ProcessRunner, SystemRunner};

/// Arguments passed to the generator.
const BUILD_ARGS: [&str; 2] = ["build", "--clean"];

/// Error returned by [`MkDocsBuilder::build`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Root or docs directory could not be created.
    #[error("failed to make dir {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Finalization rejected the record.
    #[error("failed to build config")]
    Config(#[source] ConfigError),
    /// `mkdocs.yml` could not be rendered or written.
    #[error("failed to write config file {}", .path.display())]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Generator could not be found or started.
    #[error("failed to run generator")]
    Exec(#[from] ExecError),
    /// Generator exited unsuccessfully.
    #[error("generator failed with {}", .code.map_or_else(|| "no exit code".to_owned(), |c| format!("exit code {c}")))]
    Generator {
        /// Exit code, `None` if terminated by a signal.
        code: Option<i32>,
        /// Combined stdout and stderr of the generator.
        output: Vec<String>,
    },
}

impl BuildError {
    /// Captured generator output, empty for other failures.
    #[must_use]
    pub fn output(&self) -> &[String] {
        match self {
            Self::Generator { output, .. } => output,
            _ => &[],
        }
    }
}

/// Builds a MkDocs site rooted at a directory.
///
/// The root holds `mkdocs.yml`, the `docs_dir` sources and the `site_dir`
/// output of the generator.
pub struct MkDocsBuilder {
    root: PathBuf,
    config: MkDocsConfig,
    runner: Option<Arc<dyn ProcessRunner>>,
}

impl MkDocsBuilder {
    /// Create a builder for `root` with `overrides` over the default record.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, overrides: MkDocsOverrides) -> Self {
        Self::from_config(root, MkDocsConfig::with_overrides(overrides))
    }

    /// Create a builder for `root` around an existing record.
    #[must_use]
    pub fn from_config(root: impl Into<PathBuf>, config: MkDocsConfig) -> Self {
        Self {
            root: root.into(),
            config,
            runner: None,
        }
    }

    /// Use `runner` for the generator instead of resolving `mkdocs` on `PATH`.
    #[must_use]
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn config(&self) -> &MkDocsConfig {
        &self.config
    }

    /// Mutable access for setters and `add_page`.
    pub fn config_mut(&mut self) -> &mut MkDocsConfig {
        &mut self.config
    }

    /// Path of the generated `mkdocs.yml`.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(MKDOCS_FILENAME)
    }

    /// Write `mkdocs.yml` and, unless `config_only`, run `build --clean`.
    ///
    /// Stages run in order and stop at the first failure. Directories and
    /// files created before a failure are left in place.
    pub fn build(&mut self, config_only: bool) -> Result<(), BuildError> {
        self.prepare_dirs()?;
        self.config.finalize().map_err(BuildError::Config)?;
        self.write_config()?;

        if config_only {
            tracing::info!(root = %self.root.display(), "config written, generator skipped");
            return Ok(());
        }

        self.run_generator()
    }

    /// Finalize the record and return the YAML without touching disk.
    pub fn render(&mut self) -> Result<String, BuildError> {
        self.config.finalize().map_err(BuildError::Config)?;
        self.config.to_yaml().map_err(BuildError::Config)
    }

    /// Ensure the root and its docs directory exist.
    ///
    /// Existing directories are fine. Returns the docs directory path.
    pub fn prepare_dirs(&self) -> Result<PathBuf, BuildError> {
        create_dir(&self.root)?;

        let docs_dir = match self.config.docs_dir() {
            "" => DEFAULT_DOCS_DIR,
            dir => dir,
        };
        let docs_path = self.root.join(docs_dir);
        create_dir(&docs_path)?;

        Ok(docs_path)
    }

    /// Render the record and write it to `mkdocs.yml` under the root.
    pub fn write_config(&self) -> Result<PathBuf, BuildError> {
        let path = self.config_path();
        let write_error = |source| BuildError::WriteConfig {
            path: path.clone(),
            source,
        };

        let yaml = self
            .config
            .to_yaml()
            .map_err(|e| write_error(std::io::Error::other(e)))?;
        std::fs::write(&path, yaml).map_err(write_error)?;

        tracing::info!(path = %path.display(), "wrote mkdocs config");
        Ok(path)
    }

    fn run_generator(&self) -> Result<(), BuildError> {
        let runner: Arc<dyn ProcessRunner> = match &self.runner {
            Some(runner) => Arc::clone(runner),
            None => Arc::new(SystemRunner::resolve(DEFAULT_GENERATOR)?),
        };

        let output = runner.run(&self.root, &BUILD_ARGS)?;
        if output.success() {
            tracing::info!(root = %self.root.display(), "site built");
            return Ok(());
        }

        tracing::debug!(code = ?output.code, "generator failed");
        Err(BuildError::Generator {
            code: output.code,
            output: output.lines,
        })
    }
}

/// Create `path` and missing parents with mode 0755.
fn create_dir(path: &Path) -> Result<(), BuildError> {
    if path.is_dir() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder
        .create(path)
        .map_err(|source| BuildError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), "created directory");
    Ok(())
}
