//! Configuration management for opsboard.
//!
//! Loading and validation use figment, layering defaults, a TOML config file
//! and environment variables.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::OutputFormat;
use crate::store::IdStrategy;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the user's config dir.
const APP_DIR_NAME: &str = "opsboard";

/// Environment variable prefix.
const ENV_PREFIX: &str = "OPSBOARD_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `OPSBOARD_`, sections split on `__`)
/// 2. TOML config file at `~/.config/opsboard/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// List pipeline behavior.
    pub pipeline: PipelineConfig,
    /// Record store behavior.
    pub store: StoreConfig,
    /// Output settings.
    pub display: DisplayConfig,
    /// Seed data location.
    pub data: DataConfig,
}

/// Pipeline-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Treat list query validation failures as fatal.
    pub strict: bool,
}

/// Store-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// How new record ids are generated.
    pub id_strategy: IdStrategy,
}

/// Display-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows shown when no `--limit` is given.
    pub page_size: usize,
    /// Output format when no `--format` is given.
    pub format: OutputFormat,
}

/// Seed data configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory of `<entity>.json` files overriding the built-in seeds.
    pub seed_dir: Option<PathBuf>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.display.page_size == 0 {
            return Err(Error::ConfigValidation {
                message: "page_size must be greater than 0".to_string(),
            });
        }

        if let Some(dir) = &self.data.seed_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(Error::ConfigValidation {
                    message: format!("seed_dir is not a directory: {}", dir.display()),
                });
            }
        }

        Ok(())
    }

    /// The seed directory, if one is configured.
    #[must_use]
    pub fn seed_dir(&self) -> Option<&Path> {
        self.data.seed_dir.as_deref()
    }
}
