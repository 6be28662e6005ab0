//! Runtime configuration: key identities, classifier artifact, logging.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Env var naming the config file; falls back to `config.json`
pub const CONFIG_PATH_ENV: &str = "KEYSTROKE_METRICS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Which key identifiers count as editing keys
    pub keys: KeysConfig,
    /// Cluster classifier artifact
    pub classifier: ClassifierConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// `KeyboardEvent.key` values treated as Backspace
    pub backspace: Vec<String>,
    /// `KeyboardEvent.key` values treated as Delete
    pub delete: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub enabled: bool,
    /// JSON artifact with feature order, scaler and centroids
    pub artifact_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            backspace: vec!["Backspace".to_string()],
            delete: vec!["Delete".to_string()],
        }
    }
}

impl KeysConfig {
    pub fn is_backspace(&self, key: &str) -> bool {
        self.backspace.iter().any(|k| k == key)
    }

    pub fn is_delete(&self, key: &str) -> bool {
        self.delete.iter().any(|k| k == key)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            artifact_path: PathBuf::from("cluster_model.json"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &Path) -> Self {
        Self::load_strict(path).unwrap_or_default()
    }

    /// Load a path the user named explicitly: missing or malformed files are errors.
    pub fn load_strict(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Path from [`CONFIG_PATH_ENV`], else `config.json`
    pub fn default_path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"))
    }
}
