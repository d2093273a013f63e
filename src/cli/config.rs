//! Manage the locker-gen configuration file.
//!
//! # Examples
//!
//! ```bash
//! locker-gen config           # same as `config show`
//! locker-gen config path
//! locker-gen config init --force
//! ```

use crate::config::GeneratorConfig;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

/// Arguments of `locker-gen config`.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Config subcommand; defaults to `show`
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommands {
    /// Write a configuration file holding the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,

    /// Print the configuration file location
    Path,
}

impl ConfigCommand {
    /// Runs the subcommand against `config_path` or the default location.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        match self.command {
            Some(ConfigSubcommands::Init {
                force,
            }) => Self::init(force, config_path).await,
            Some(ConfigSubcommands::Show) | None => Self::show(config_path).await,
            Some(ConfigSubcommands::Path) => Self::show_path(config_path),
        }
    }

    fn resolve_path(config_path: Option<PathBuf>) -> Result<PathBuf> {
        match config_path {
            Some(path) => Ok(path),
            None => GeneratorConfig::default_path(),
        }
    }

    async fn init(force: bool, config_path: Option<PathBuf>) -> Result<()> {
        let config_path = Self::resolve_path(config_path)?;

        if config_path.exists() && !force {
            println!("Config already exists at: {}", config_path.display());
            println!("   Use --force to overwrite");
            return Ok(());
        }

        let config = GeneratorConfig::default();
        config.save_to(&config_path).await?;

        println!("{} Created config at: {}", "✓".green(), config_path.display());
        println!("\n{}", config.to_toml()?);

        Ok(())
    }

    async fn show(config_path: Option<PathBuf>) -> Result<()> {
        let config_path = Self::resolve_path(config_path)?;
        let config = GeneratorConfig::load_with_optional(Some(config_path.clone())).await?;

        println!("{}", "Configuration".bold());
        if config_path.exists() {
            println!("Location: {}\n", config_path.display());
        } else {
            println!("Location: {} (not found, using defaults)\n", config_path.display());
        }
        println!("{}", config.to_toml()?);

        Ok(())
    }

    fn show_path(config_path: Option<PathBuf>) -> Result<()> {
        println!("{}", Self::resolve_path(config_path)?.display());
        Ok(())
    }
}
