//! CLI error types.

use docbuilder_config::ConfigError;
use docbuilder_exec::ExecError;
use docbuilder_mkdocs::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl CliError {
    /// Generator output attached to the error, if any.
    pub(crate) fn tool_output(&self) -> &[String] {
        match self {
            Self::Build(err) => err.output(),
            _ => &[],
        }
    }

    /// The error and its causes joined by `": "`.
    pub(crate) fn report(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = err.source();
        }
        message
    }
}
