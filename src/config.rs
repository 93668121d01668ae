//! YAML configuration for navcompat.
//!
//! One file describes where the catalog lives and how the matcher falls back
//! when nothing real matches. Loaded by the CLI and by the HTTP server.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! catalog:
//!   backend: "redb"          # or "memory"
//!   redb_path: "/data/catalog.redb"
//!   seed_file: "catalog.json" # optional JSON export loaded at startup
//!
//! matcher:
//!   fallback:
//!     enabled: true
//!     min_products: 3
//!     max_products: 8
//!     require_known_brand: false
//! ```

use std::fs;
use std::path::Path;

use catalog::BackendConfig;
use matcher::{MatchError, MatcherConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

impl From<MatchError> for ConfigLoadError {
    fn from(err: MatchError) -> Self {
        ConfigLoadError::Validation(err.to_string())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavcompatConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub catalog: CatalogYamlConfig,

    #[serde(default)]
    pub matcher: MatcherConfig,
}

impl NavcompatConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: NavcompatConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.catalog.validate()?;
        self.matcher.validate()?;
        Ok(())
    }
}

impl Default for NavcompatConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            catalog: CatalogYamlConfig::default(),
            matcher: MatcherConfig::default(),
        }
    }
}

/// Which catalog store to open.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CatalogBackendKind {
    #[default]
    Memory,
    Redb,
}

/// Catalog section of the YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CatalogYamlConfig {
    #[serde(default)]
    pub backend: CatalogBackendKind,

    /// Database file for the `redb` backend.
    #[serde(default)]
    pub redb_path: Option<String>,

    /// JSON array of products upserted into the store at startup.
    #[serde(default)]
    pub seed_file: Option<String>,
}

impl CatalogYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.backend == CatalogBackendKind::Redb
            && self.redb_path.as_deref().is_none_or(|p| p.trim().is_empty())
        {
            return Err(ConfigLoadError::Validation(
                "catalog.redb_path is required for the redb backend".to_string(),
            ));
        }
        Ok(())
    }

    /// Translate into the catalog crate's backend selector.
    pub fn backend_config(&self) -> BackendConfig {
        match (self.backend, &self.redb_path) {
            (CatalogBackendKind::Redb, Some(path)) => BackendConfig::redb(path.clone()),
            _ => BackendConfig::in_memory(),
        }
    }
}
