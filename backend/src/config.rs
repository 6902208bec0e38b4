//! Application configuration file support.
//!
//! Configuration is read from a TOML file and then adjusted by environment
//! variables:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [repository]
//! type = "file"
//! path = "data/owners.json"
//! sample_data = false
//! ```
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! server on `0.0.0.0:8080` backed by an in-memory repository.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::db::factory::RepositoryType;
use crate::db::repository::RepositoryError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub repository: RepositorySettings,
}

/// HTTP bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Repository backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    /// Owner file for the `file` backend
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Preload demo owners into an empty store
    #[serde(default)]
    pub sample_data: bool,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            path: None,
            sample_data: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_repo_type() -> String {
    "local".to_string()
}

impl RepositorySettings {
    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repo_type)
    }
}

impl ServerSettings {
    /// `host:port` string suitable for parsing into a socket address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `petclinic.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when none of them exists. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn from_default_location() -> Result<Option<Self>, RepositoryError> {
        Self::from_first_existing(&[
            PathBuf::from("petclinic.toml"),
            PathBuf::from("backend/petclinic.toml"),
            PathBuf::from("../petclinic.toml"),
        ])
    }

    fn from_first_existing(search_paths: &[PathBuf]) -> Result<Option<Self>, RepositoryError> {
        match search_paths.iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(path).map(Some),
            None => Ok(None),
        }
    }

    /// Load from `PETCLINIC_CONFIG`, else the default location, else defaults;
    /// then apply environment overrides.
    pub fn load() -> Result<Self, RepositoryError> {
        let config = match env::var("PETCLINIC_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?.unwrap_or_default(),
        };
        config.with_env_overrides()
    }

    /// Apply `HOST`, `PORT`, `REPOSITORY_TYPE`, `REPOSITORY_PATH` and
    /// `REPOSITORY_SAMPLE_DATA`.
    pub fn with_env_overrides(mut self) -> Result<Self, RepositoryError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.parse().map_err(|_| {
                RepositoryError::configuration(format!(
                    "PORT must be a valid port number, got '{}'",
                    port
                ))
            })?;
        }
        if let Ok(repo_type) = env::var("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        if let Ok(path) = env::var("REPOSITORY_PATH") {
            self.repository.path = Some(PathBuf::from(path));
        }
        if let Ok(sample) = env::var("REPOSITORY_SAMPLE_DATA") {
            self.repository.sample_data =
                matches!(sample.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(self)
    }
}
