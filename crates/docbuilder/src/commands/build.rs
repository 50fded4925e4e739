//! `docbuilder build` command implementation.

use std::sync::Arc;

use clap::Args;
use docbuilder_exec::SystemRunner;
use docbuilder_mkdocs::MkDocsBuilder;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Only write mkdocs.yml, do not run the generator.
    #[arg(long)]
    config_only: bool,

    /// Generator executable name or path (overrides config).
    #[arg(long, env = "DOCBUILDER_GENERATOR")]
    generator: Option<String>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the generator cannot be
    /// found, or any build stage fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config_only = self.config_only;
        let config = self.config.load(self.generator)?;

        let mut builder =
            MkDocsBuilder::from_config(&config.root_resolved, config.builder_config());
        if !config_only {
            let runner = SystemRunner::resolve(&config.generator)?;
            output.info(&format!("Generator: {}", runner.program().display()));
            builder = builder.with_runner(Arc::new(runner));
        }

        output.info(&format!("Root: {}", builder.root().display()));
        builder.build(config_only)?;

        if config_only {
            output.success(&format!("Wrote {}", builder.config_path().display()));
        } else {
            output.success(&format!(
                "Site built successfully to {}",
                builder.root().join(builder.config().site_dir()).display()
            ));
        }
        Ok(())
    }
}
