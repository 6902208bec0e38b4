//! JSON-file backed repository.
//!
//! Keeps the owner table in memory and rewrites the whole file after every
//! successful save. Writes go to a sibling temporary file first and are then
//! renamed over the target.

use async_trait::async_trait;
use log::{debug, info};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

use super::local::LocalData;
use crate::api::{Owner, OwnerId};
use crate::db::repository::*;

/// Repository persisting owners to a JSON array on disk.
pub struct FileRepository {
    path: PathBuf,
    data: Mutex<LocalData>,
}

impl FileRepository {
    /// Open the repository at `path`.
    ///
    /// A missing file is treated as an empty store and is created on the first
    /// save. A present but malformed file is an error.
    pub fn open(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref().to_path_buf();
        let owners = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                RepositoryError::from(e).with_operation("open_file_repository")
            })?;
            let owners: Vec<Owner> = serde_json::from_str(&content)
                .map_err(|e| RepositoryError::from(e).with_operation("open_file_repository"))?;
            info!("Loaded {} owners from {}", owners.len(), path.display());
            owners
        } else {
            info!("No owner file at {}, starting empty", path.display());
            Vec::new()
        };

        let data = LocalData::from_owners(owners)
            .map_err(|e| e.with_operation("open_file_repository"))?;
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.data.lock().owners.is_empty()
    }

    /// Insert owners (ignoring their ids) and write the file once.
    pub fn seed(&self, owners: Vec<Owner>) -> RepositoryResult<()> {
        let mut data = self.data.lock();
        for owner in owners {
            data.insert(owner);
        }
        self.flush(&data).map_err(|e| e.with_operation("seed"))
    }

    fn flush(&self, data: &LocalData) -> RepositoryResult<()> {
        let owners: Vec<&Owner> = data.owners.values().collect();
        let json = serde_json::to_string_pretty(&owners)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Wrote {} owners to {}", owners.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl OwnerRepository for FileRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.lock().is_healthy)
    }

    async fn find_owners_by_last_name(&self, last_name: &str) -> RepositoryResult<Vec<Owner>> {
        Ok(self.data.lock().find_by_last_name(last_name))
    }

    async fn find_owner_by_id(&self, owner_id: OwnerId) -> RepositoryResult<Owner> {
        self.data.lock().find_by_id(owner_id)
    }

    async fn save_owner(&self, owner: &Owner) -> RepositoryResult<Owner> {
        let mut data = self.data.lock();
        let previous_next_id = data.next_owner_id;
        let previous = owner.id.and_then(|id| data.owners.get(&id).cloned());

        let saved = data.save(owner)?;
        if let Err(e) = self.flush(&data) {
            // Roll back so memory never runs ahead of the file
            match (owner.id, previous) {
                (Some(id), Some(previous)) => {
                    data.owners.insert(id, previous);
                }
                _ => {
                    if let Some(id) = saved.id {
                        data.owners.remove(&id);
                    }
                    data.next_owner_id = previous_next_id;
                }
            }
            return Err(e.with_operation("save_owner"));
        }
        Ok(saved)
    }

    async fn count_owners(&self) -> RepositoryResult<usize> {
        Ok(self.data.lock().owners.len())
    }
}
