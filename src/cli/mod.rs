//! Command-line interface for locker-gen.
//!
//! # Available Commands
//!
//! - `generate` - Fetch the catalog and write the synthesized profile
//! - `config` - Show, locate or initialize the configuration file
//! - `aliases` - Print the effective backend value alias table
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only log errors
//! - `--config` - Path to a custom config file
//!
//! # Example
//!
//! ```bash
//! # Regenerate the profile from the live catalog
//! locker-gen generate
//!
//! # Reproducible run from a saved catalog snapshot
//! locker-gen generate --catalog-file cosmetics.json --output /tmp/athena.json
//!
//! # Where is the config file?
//! locker-gen config path
//! ```

mod aliases;
mod config;
mod generate;

use crate::config::GeneratorConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings derived from the global flags, applied before any command runs.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,

    /// Explicit configuration file, if any
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Installs the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the level chosen by `--verbose`/`--quiet`.
    /// Logs go to stderr so command output on stdout stays machine-readable.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Main CLI structure.
#[derive(Parser)]
#[command(
    name = "locker-gen",
    about = "Synthesize a locker profile from the cosmetics catalog",
    version,
    long_about = "locker-gen fetches the full cosmetics catalog, normalizes every item into a \
                  granted profile entry, and merges the result into a profile template."
)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and write the synthesized profile
    Generate(generate::GenerateCommand),

    /// Manage the configuration file
    Config(config::ConfigCommand),

    /// Print the effective backend value aliases
    Aliases(aliases::AliasesCommand),
}

impl Cli {
    /// Executes the parsed command.
    ///
    /// # Errors
    ///
    /// Returns whatever error the selected command produced.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Derives the runtime settings from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    /// Executes the parsed command with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns whatever error the selected command produced.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Generate(cmd) => {
                let settings = GeneratorConfig::load_with_optional(config.config_path).await?;
                cmd.execute(&settings).await
            }
            Commands::Config(cmd) => cmd.execute(config.config_path).await,
            Commands::Aliases(cmd) => {
                let settings = GeneratorConfig::load_with_optional(config.config_path).await?;
                cmd.execute(&settings)
            }
        }
    }
}
