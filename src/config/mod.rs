//! Configuration for locker-gen.
//!
//! Settings are read from an optional TOML file. When the file does not exist the
//! built-in defaults apply, so a fresh checkout runs without any setup.
//!
//! # Location
//!
//! - Default: `~/.locker-gen/config.toml`
//! - Override: `--config <path>` on the command line
//!
//! # Format
//!
//! ```toml
//! endpoint = "https://fortnite-api.com/v2/cosmetics"
//! template = "profiles/athena_template.json"
//! output = "~/server/profiles/athena.json"
//!
//! # Extra raw → canonical backend values, layered over the built-in table
//! [aliases]
//! JunoBuildingSet = "JunoBuildingProp"
//! ```
//!
//! Paths may start with `~`. Command-line flags take precedence over the file.

use crate::alias::AliasTable;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CATALOG_ENDPOINT, DEFAULT_OUTPUT_PATH,
    DEFAULT_TEMPLATE_PATH,
};
use crate::core::LockerError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Settings for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Catalog endpoint
    pub endpoint: String,

    /// Profile template location, may start with `~`
    pub template: String,

    /// Output profile location, may start with `~`
    pub output: String,

    /// Extra backend value aliases
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CATALOG_ENDPOINT.to_string(),
            template: DEFAULT_TEMPLATE_PATH.to_string(),
            output: DEFAULT_OUTPUT_PATH.to_string(),
            aliases: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// Loads the configuration from `path`, or from the default location when
    /// `path` is `None`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match Self::default_path() {
                Ok(path) => path,
                Err(_) => return Ok(Self::default()),
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns [`LockerError::ConfigError`] if the file cannot be read or is not valid
    /// TOML for this schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| LockerError::ConfigError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;

        let config = toml::from_str(&content).map_err(|e| LockerError::ConfigError {
            message: format!("cannot parse {}: {e}", path.display()),
        })?;
        Ok(config)
    }

    /// Writes the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = self.to_toml()?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// The configuration rendered as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Default configuration file location: `~/.locker-gen/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;
        Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Template location with `~` expanded.
    #[must_use]
    pub fn template_path(&self) -> PathBuf {
        expand_path(&self.template)
    }

    /// Output location with `~` expanded.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        expand_path(&self.output)
    }

    /// The built-in alias table with configured aliases layered on top.
    #[must_use]
    pub fn alias_table(&self) -> AliasTable {
        AliasTable::builtin().with_overrides(
            self.aliases.iter().map(|(raw, canonical)| (raw.as_str(), canonical.as_str())),
        )
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
