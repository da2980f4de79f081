//! Configuration loader for linkrepo
//!
//! Layered loading, lowest to highest priority:
//! 1. `{config_dir}/default.toml` (optional)
//! 2. `{config_dir}/{environment}.toml` (optional)
//! 3. `{config_dir}/local.toml` (optional, not committed)
//! 4. `LINKREPO_*` environment variables

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for the configuration directory
const CONFIG_DIR_ENV: &str = "LINKREPO_CONFIG_DIR";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "LINKREPO";

/// Separator for nested configuration keys in environment variables,
/// e.g. `LINKREPO_SERVER__PORT` -> `server.port`
const ENV_SEPARATOR: &str = "__";

#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Creates a loader from `LINKREPO_CONFIG_DIR` and `LINKREPO_APP_ENV`.
    pub fn new() -> Self {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        Self {
            config_dir,
            environment: AppEnvironment::from_env(),
        }
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Loads and validates settings from every source. All files are
    /// optional; serde defaults fill whatever the layers leave unset.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder()
            .add_source(self.file_source(&self.config_dir.join("default.toml")))
            .add_source(
                self.file_source(
                    &self
                        .config_dir
                        .join(format!("{}.toml", self.environment.as_str())),
                ),
            )
            .add_source(self.file_source(&self.config_dir.join("local.toml")))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );

        builder.build().map_err(ConfigError::from)
    }

    fn file_source(&self, path: &Path) -> File<config::FileSourceFile, FileFormat> {
        File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(false)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
