//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod inspect;

use clap::{Parser, Subcommand};

/// docnode - inspect documented entities in XML documentation files
#[derive(Debug, Parser)]
#[command(name = "docnode")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DOCNODE_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the entities documented in an XML documentation file
    Inspect(inspect::InspectArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Inspect(args) => inspect::execute(args, config_path),
        Commands::Config(cmd) => config::execute(cmd, config_path),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_inspect_args() {
        let cli = Cli::try_parse_from(["docnode", "-vv", "inspect", "api.xml", "--kind", "method"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }
}
