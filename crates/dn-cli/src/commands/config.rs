//! Config command
//!
//! Manage docnode configuration.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use dn_core::config::{Config, LOCAL_CONFIG_PATH};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Write the per-user file instead of the project-local one
        #[arg(long)]
        user: bool,
    },

    /// Print where configuration is read from
    Path,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(json, config_path),
        ConfigCommand::Init { force, user } => init_config(force, user, config_path),
        ConfigCommand::Path => show_path(config_path),
    }
}

fn show_config(as_json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = Config::discover(config_path).context("Failed to load configuration")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", toml::to_string_pretty(&config)?);
    }

    Ok(())
}

fn init_target(user: bool, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        return Ok(path.to_path_buf());
    }
    if user {
        return Config::user_config_path().context("Could not determine the user config directory");
    }
    Ok(PathBuf::from(LOCAL_CONFIG_PATH))
}

fn init_config(force: bool, user: bool, config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let path = init_target(user, config_path)?;
    if path.exists() && !force {
        bail!(
            "Configuration already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    eprintln!("{} Wrote default configuration to {}", "✓".green(), path.display());
    Ok(())
}

fn show_path(config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let candidates: Vec<PathBuf> = match config_path {
        Some(path) => vec![path.to_path_buf()],
        None => std::iter::once(PathBuf::from(LOCAL_CONFIG_PATH))
            .chain(Config::user_config_path())
            .collect(),
    };

    match candidates.iter().find(|p| p.exists()) {
        Some(path) => println!("{}", path.display()),
        None => {
            println!("{}", "(defaults, no configuration file found)".dimmed());
            for path in &candidates {
                println!("  searched: {}", path.display());
            }
        }
    }

    Ok(())
}
