//! docbuilder CLI - MkDocs configuration builder.
//!
//! Provides commands for:
//! - `build`: Write `mkdocs.yml` and run `mkdocs build --clean`
//! - `render`: Print the generated `mkdocs.yml` without writing it

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, RenderArgs};
use output::Output;

/// docbuilder - MkDocs configuration builder.
#[derive(Parser)]
#[command(name = "docbuilder", version, about)]
struct Cli {
    /// Enable verbose output (debug logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write mkdocs.yml and build the site.
    Build(BuildArgs),
    /// Print the generated mkdocs.yml.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise RUST_LOG (ERROR only when unset)
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.tool_output(err.tool_output());
        output.error(&format!("Error: {}", err.report()));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::try_parse_from([
            "docbuilder",
            "build",
            "--root",
            "out",
            "--config-only",
            "--site-name",
            "Handbook",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["docbuilder", "render", "--theme", "material"]).unwrap();
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_render_rejects_generator_flag() {
        let result = Cli::try_parse_from(["docbuilder", "render", "--generator", "mkdocs"]);
        assert!(result.is_err());
    }
}
