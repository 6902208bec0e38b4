//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use log::info;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repositories::{sample_owners, FileRepository, LocalRepository};
use super::repository::{OwnerRepository, RepositoryError, RepositoryResult};
use crate::config::{AppConfig, RepositorySettings};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
    /// JSON file on disk
    File,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("local", "memory", "file", "json").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use petclinic::config::RepositorySettings;
/// use petclinic::db::RepositoryFactory;
///
/// let settings = RepositorySettings::default();
/// let repo = RepositoryFactory::create(&settings).unwrap();
/// # let _ = repo;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance from repository settings.
    ///
    /// When `sample_data` is set and the selected store is empty, the demo
    /// owners are inserted.
    pub fn create(settings: &RepositorySettings) -> RepositoryResult<Arc<dyn OwnerRepository>> {
        let repo_type = settings.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Local => {
                info!("Using in-memory owner repository");
                if settings.sample_data {
                    Ok(Arc::new(LocalRepository::with_sample_data()) as Arc<dyn OwnerRepository>)
                } else {
                    Ok(Self::create_local())
                }
            }
            RepositoryType::File => {
                let path = settings.path.as_ref().ok_or_else(|| {
                    RepositoryError::configuration(
                        "File repository requires 'repository.path' setting",
                    )
                })?;
                let repo = Self::create_file(path)?;
                if settings.sample_data && repo.is_empty() {
                    info!("Seeding {} with sample owners", path.display());
                    repo.seed(sample_owners())?;
                }
                Ok(repo as Arc<dyn OwnerRepository>)
            }
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn OwnerRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Open a file-backed repository.
    pub fn create_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Arc<FileRepository>> {
        info!("Using file owner repository at {}", path.as_ref().display());
        Ok(Arc::new(FileRepository::open(path)?))
    }

    /// Create repository from environment variables alone.
    ///
    /// Reads the same `REPOSITORY_*` variables as [`AppConfig::load`], on top
    /// of the built-in defaults.
    pub fn from_env() -> RepositoryResult<Arc<dyn OwnerRepository>> {
        let config = AppConfig::default().with_env_overrides()?;
        Self::create(&config.repository)
    }

    /// Create repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn OwnerRepository>> {
        let config = AppConfig::from_file(config_path)?;
        Self::create(&config.repository)
    }
}
