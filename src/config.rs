// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Application configuration.
//!
//! ```toml
//! [storage]
//! data_dir = "/var/lib/reliagraph"
//! durable = true
//!
//! [defaults]
//! reliability = 0.95
//! k = 2
//! ```
//!
//! Search order for the file:
//! 1. Explicit path, if given (must exist)
//! 2. Local `reliagraph/config.toml`
//! 3. Platform-specific config directory
//! 4. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;
use crate::model::diagram::{validate_k, validate_reliability};
use crate::ops::{NodeDefaults, DEFAULT_K, DEFAULT_RELIABILITY};
use crate::store::WriteDurability;

const LOCAL_CONFIG_PATH: &str = "reliagraph/config.toml";
const FALLBACK_DATA_DIR: &str = ".reliagraph";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("failed to read configuration file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML configuration {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration value `{field}`: {source}")]
    Invalid {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Folder holding one JSON file per stored key.
    pub data_dir: Option<PathBuf>,
    /// Fsync files and their directory after each write.
    pub durable: bool,
}

/// Values given to freshly added nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub reliability: f64,
    pub k: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            reliability: DEFAULT_RELIABILITY,
            k: DEFAULT_K,
        }
    }
}

impl AppConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_reliability(self.defaults.reliability).map_err(|source| ConfigError::Invalid {
            field: "defaults.reliability",
            source,
        })?;
        validate_k(self.defaults.k).map_err(|source| ConfigError::Invalid {
            field: "defaults.k",
            source,
        })?;
        Ok(())
    }

    /// Configured data directory, else the platform data directory, else `./.reliagraph`.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
    }

    pub fn durability(&self) -> WriteDurability {
        if self.storage.durable {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        }
    }

    pub fn node_defaults(&self) -> NodeDefaults {
        NodeDefaults {
            reliability: self.defaults.reliability,
            k: self.defaults.k,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "reliagraph", "reliagraph")
}

/// Finds and loads the configuration.
///
/// # Errors
///
/// Returns an error if an explicit path is given but does not exist, or if a found file
/// cannot be read, parsed or validated.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit_path {
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG_PATH);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(dirs) = project_dirs() {
        let system_config = dirs.config_dir().join("config.toml");
        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(&system_config);
        }
        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    AppConfig::from_toml_str(&content, path)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use rstest::rstest;

    use super::{load_config, AppConfig, ConfigError};
    use crate::store::WriteDurability;

    #[test]
    fn defaults_match_the_node_palette() {
        let config = AppConfig::default();
        assert_eq!(config.defaults.reliability, 0.95);
        assert_eq!(config.defaults.k, 2);
        assert_eq!(config.durability(), WriteDurability::BestEffort);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/tmp/rg\"\ndurable = true\n\n[defaults]\nk = 3\n",
        )
        .expect("write config");

        let config = load_config(Some(path.as_path())).expect("load");
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/rg"));
        assert_eq!(config.durability(), WriteDurability::Durable);
        assert_eq!(config.defaults.k, 3);
        assert_eq!(config.defaults.reliability, 0.95);
        assert_eq!(config.node_defaults().k, 3);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            load_config(Some(path.as_path())),
            Err(ConfigError::MissingFile(missing)) if missing == path
        ));
    }

    #[rstest]
    #[case("[defaults]\nreliability = 1.5\n", "defaults.reliability")]
    #[case("[defaults]\nk = 0\n", "defaults.k")]
    fn out_of_range_defaults_are_rejected(#[case] content: &str, #[case] expected: &str) {
        match AppConfig::from_toml_str(content, Path::new("inline.toml")) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml_str("[storage\n", Path::new("broken.toml")),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml_str("", Path::new("empty.toml")).expect("parse");
        assert_eq!(config, AppConfig::default());
    }
}
