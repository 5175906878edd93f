use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::analytics::CombinedWeights;
use crate::error::{Error, Result};
use crate::store::DEFAULT_MAX_ENTRIES;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub web_root: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            web_root: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file backing the suggestion store; in-memory when unset.
    pub path: Option<PathBuf>,
    pub max_entries: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub combined: CombinedWeights,
    pub server: ServerConfig,
    pub store: StoreConfig,
}

impl AnalyticsConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents).map_err(|err| {
                    Error::Config(format!("failed to parse {}: {}", path.display(), err))
                })?
            }
            _ => AnalyticsConfig::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| Error::Config(format!("failed to serialize config: {}", err)))?;
        std::fs::write(path, payload)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let CombinedWeights { absolute, relative } = self.combined;
        if !absolute.is_finite() || !relative.is_finite() || absolute < 0.0 || relative < 0.0 {
            return Err(Error::Config(format!(
                "combined weights must be finite and non-negative (absolute={}, relative={})",
                absolute, relative
            )));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(weight) = env::var("COMBINED_ABSOLUTE_WEIGHT") {
            if let Ok(value) = weight.parse::<f64>() {
                self.combined.absolute = value;
            }
        }
        if let Ok(weight) = env::var("COMBINED_RELATIVE_WEIGHT") {
            if let Ok(value) = weight.parse::<f64>() {
                self.combined.relative = value;
            }
        }
        if let Ok(host) = env::var("ANALYTICS_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = env::var("ANALYTICS_PORT") {
            if let Ok(value) = port.parse::<u16>() {
                self.server.port = value;
            }
        }
        if let Ok(path) = env::var("SUGGESTION_STORE_PATH") {
            if !path.trim().is_empty() {
                self.store.path = Some(PathBuf::from(path));
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ANALYTICS_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/analytics.toml")))
}
