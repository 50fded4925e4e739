//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod render;

pub(crate) use build::BuildArgs;
pub(crate) use render::RenderArgs;

use std::path::PathBuf;

use clap::Args;
use docbuilder_config::{CliSettings, Config};

use crate::error::CliError;

/// Options shared by every command that loads the project file.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover docbuilder.toml).
    #[arg(short, long, env = "DOCBUILDER_CONFIG")]
    config: Option<PathBuf>,

    /// Output root containing mkdocs.yml (overrides config).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Site name (overrides config).
    #[arg(long)]
    site_name: Option<String>,

    /// Canonical site URL (overrides config).
    #[arg(long)]
    site_url: Option<String>,

    /// Repository link shown in the header (overrides config).
    #[arg(long)]
    repo_url: Option<String>,

    /// MkDocs theme (overrides config).
    #[arg(long)]
    theme: Option<String>,
}

impl ConfigArgs {
    /// Load the project file with these arguments applied on top.
    pub(crate) fn load(self, generator: Option<String>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            root: self.root,
            generator,
            site_name: self.site_name,
            site_url: self.site_url,
            repo_url: self.repo_url,
            theme: self.theme,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
