use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::period::Period;
use crate::errors::{FinanceError, Result};
use crate::utils::{
    fs::{ensure_dir, write_atomic},
    PathResolver,
};

/// User preferences persisted as `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Period used for the dashboard balance.
    pub default_period: Period,
    /// Where collections are stored; `<base>/data` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "es-MX".into(),
            currency: "MXN".into(),
            default_period: Period::Month,
            data_dir: None,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at the resolved application directory.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Reads the stored configuration, or the defaults when none was saved.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no configuration file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            FinanceError::ConfigError(format!("{}: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    /// Directory holding the collections for `config`.
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| PathResolver::data_dir_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (ConfigManager, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        (manager, temp)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let (manager, _guard) = manager();
        let config = manager.load().expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.default_period, Period::Month);
    }

    #[test]
    fn saved_configuration_is_reloaded() {
        let (manager, guard) = manager();
        let config = Config {
            default_period: Period::Quarter,
            ..Config::default()
        };
        manager.save(&config).expect("save");
        let raw = fs::read_to_string(manager.path()).unwrap();
        assert!(raw.contains("\"trimestre\""));
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(manager.data_dir(&config), guard.path().join("data"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let (manager, _guard) = manager();
        fs::write(manager.path(), r#"{"currency":"USD"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.locale, "es-MX");
    }

    #[test]
    fn corrupt_file_is_a_config_error() {
        let (manager, _guard) = manager();
        fs::write(manager.path(), "{not json").unwrap();
        assert!(matches!(manager.load(), Err(FinanceError::ConfigError(_))));
    }
}
