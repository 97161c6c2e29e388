use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    currency::FormatSettings,
    errors::{Result, TrackerError},
};

pub const CONFIG_KEYS: [&str; 3] = ["locale", "currency", "data_dir"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn format_settings(&self) -> FormatSettings {
        FormatSettings::for_locale(&self.locale, &self.currency)
    }

    /// Directory holding the JSON key files, `data_dir` overriding `<base>/store`.
    pub fn store_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathResolver::store_dir_in(base))
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "locale" => {
                if value.is_empty() {
                    return Err(TrackerError::Config("locale cannot be empty".into()));
                }
                self.locale = value.to_string();
            }
            "currency" => {
                if value.len() != 3 || !value.chars().all(|ch| ch.is_ascii_alphabetic()) {
                    return Err(TrackerError::Config(format!(
                        "currency must be a 3-letter ISO code, got `{value}`"
                    )));
                }
                self.currency = value.to_ascii_uppercase();
            }
            "data_dir" => {
                self.data_dir = match value {
                    "" | "default" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            other => {
                return Err(TrackerError::Config(format!(
                    "unknown key `{other}` (expected one of: {})",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("locale", self.locale.clone()),
            ("currency", self.currency.clone()),
            (
                "data_dir",
                self.data_dir
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "default".into()),
            ),
        ]
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
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

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file; using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            warn!(path = %self.path.display(), error = %err, "unreadable config file");
            TrackerError::Config(err.to_string())
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_keeps_changes() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("currency", "eur").unwrap();
        config.set("locale", "de-DE").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency, "EUR");
        assert_eq!(loaded.format_settings().decimal_separator, ',');
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_currencies() {
        let mut config = Config::default();
        assert!(matches!(config.set("theme", "dark"), Err(TrackerError::Config(_))));
        assert!(config.set("currency", "dollars").is_err());
        assert_eq!(config.currency, "USD");
    }

    #[test]
    fn data_dir_overrides_store_location() {
        let base = Path::new("/tmp/app");
        let mut config = Config::default();
        assert_eq!(config.store_dir(base), base.join("store"));
        config.set("data_dir", "/srv/money").unwrap();
        assert_eq!(config.store_dir(base), PathBuf::from("/srv/money"));
        config.set("data_dir", "default").unwrap();
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"currency":"GBP"}"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency, "GBP");
        assert_eq!(loaded.locale, "en-US");
    }
}
