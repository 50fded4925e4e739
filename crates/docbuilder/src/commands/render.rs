//! `docbuilder render` command implementation.

use clap::Args;
use docbuilder_mkdocs::MkDocsBuilder;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl RenderArgs {
    /// Print the finalized mkdocs.yml to stdout without writing files.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.config.load(None)?;
        let mut builder =
            MkDocsBuilder::from_config(&config.root_resolved, config.builder_config());
        let yaml = builder.render()?;
        Output::new().document(&yaml);
        Ok(())
    }
}
