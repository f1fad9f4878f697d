//! Configuration types and parsing for foreman.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_DB_PATH: &str = ":memory:";

const DEFAULT_NAME: &str = "foreman";

/// Environment variable that overrides the configured database path
pub const DATABASE_ENV_VAR: &str = "FOREMAN_DATABASE";

/// Main configuration from foreman.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Installation name
    pub name: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Defaults for master-facing commands
    #[serde(default)]
    pub master: MasterConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (file-based or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

/// Master defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MasterConfig {
    /// Name this installation registers its master under
    #[serde(default)]
    pub name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            database: DatabaseConfig::default(),
            master: MasterConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// A relative database path is resolved against the directory holding
    /// the config file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;

        if let Some(dir) = path.parent() {
            config.database.path = resolve_db_path(&config.database.path, dir);
        }
        log::debug!("Loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Load configuration from a directory.
    /// Looks for foreman.yml or foreman.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("foreman.yml");
        let yaml_path = dir.join("foreman.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "name cannot be empty".to_string(),
            });
        }
        if self.database.path.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }
        if matches!(self.master.name.as_deref(), Some("")) {
            return Err(CoreError::ConfigInvalid {
                message: "master.name cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the database path from CLI flag, FOREMAN_DATABASE, or config.
    ///
    /// Priority: CLI flag > environment variable > config file
    pub fn resolve_database_path(&self, cli_path: Option<&str>) -> String {
        cli_path
            .map(String::from)
            .or_else(|| std::env::var(DATABASE_ENV_VAR).ok())
            .unwrap_or_else(|| self.database.path.clone())
    }
}

fn resolve_db_path(path: &str, base: &Path) -> String {
    if path == DEFAULT_DB_PATH || Path::new(path).is_absolute() {
        return path.to_string();
    }
    let joined: PathBuf = base.join(path);
    joined.display().to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
