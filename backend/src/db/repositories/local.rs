//! In-memory local repository implementation.
//!
//! This module provides an in-memory implementation of [`OwnerRepository`]
//! suitable for unit testing and local development. Owners live in a
//! `BTreeMap` keyed by id, so listings come back in id order.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{Owner, OwnerId};
use crate::db::repository::*;

/// In-memory local repository.
///
/// Cloning shares the underlying store.
///
/// # Example
/// ```
/// use petclinic::api::Owner;
/// use petclinic::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// let betty = Owner::new("Betty", "Davis", "638 Cardinal Ave.", "Busan", "6085551749");
/// let id = repo.insert_owner(betty);
/// assert_eq!(repo.owner_count(), 1);
/// assert_eq!(id.value(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

/// Owner table plus id counter, shared with the file-backed repository.
#[derive(Debug)]
pub(crate) struct LocalData {
    pub(crate) owners: BTreeMap<OwnerId, Owner>,
    pub(crate) next_owner_id: OwnerId,
    pub(crate) is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            owners: BTreeMap::new(),
            next_owner_id: OwnerId(1),
            is_healthy: true,
        }
    }
}

impl LocalData {
    /// Rebuild the table from a list of owners, keeping their ids.
    ///
    /// Owners without an id are assigned one after the highest existing id.
    /// Two owners sharing an id is a storage error.
    pub(crate) fn from_owners(owners: Vec<Owner>) -> RepositoryResult<Self> {
        let mut data = LocalData::default();
        let max_id = owners.iter().filter_map(|o| o.id).max();
        if let Some(max_id) = max_id {
            data.next_owner_id = OwnerId(max_id.0 + 1);
        }
        for owner in owners {
            match owner.id {
                Some(id) if data.owners.contains_key(&id) => {
                    return Err(RepositoryError::storage_with_context(
                        format!("Owner id {} appears more than once", id),
                        ErrorContext::new("load_owners")
                            .with_entity("owner")
                            .with_entity_id(id),
                    ));
                }
                Some(id) => {
                    data.owners.insert(id, owner);
                }
                None => {
                    data.insert(owner);
                }
            }
        }
        Ok(data)
    }

    pub(crate) fn insert(&mut self, mut owner: Owner) -> OwnerId {
        let owner_id = self.next_owner_id;
        self.next_owner_id = OwnerId(owner_id.0 + 1);
        owner.id = Some(owner_id);
        self.owners.insert(owner_id, owner);
        owner_id
    }

    pub(crate) fn check_health(&self) -> RepositoryResult<()> {
        if !self.is_healthy {
            return Err(RepositoryError::connection("Database is not healthy"));
        }
        Ok(())
    }

    pub(crate) fn find_by_last_name(&self, last_name: &str) -> Vec<Owner> {
        self.owners
            .values()
            .filter(|owner| owner.last_name.starts_with(last_name))
            .cloned()
            .collect()
    }

    pub(crate) fn find_by_id(&self, owner_id: OwnerId) -> RepositoryResult<Owner> {
        self.owners.get(&owner_id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Owner {} not found", owner_id),
                ErrorContext::new("find_owner_by_id")
                    .with_entity("owner")
                    .with_entity_id(owner_id),
            )
        })
    }

    pub(crate) fn save(&mut self, owner: &Owner) -> RepositoryResult<Owner> {
        match owner.id {
            None => {
                let owner_id = self.insert(owner.clone());
                self.find_by_id(owner_id)
            }
            Some(owner_id) => {
                let slot = self.owners.get_mut(&owner_id).ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        format!("Owner {} not found", owner_id),
                        ErrorContext::new("save_owner")
                            .with_entity("owner")
                            .with_entity_id(owner_id),
                    )
                })?;
                *slot = owner.clone();
                Ok(owner.clone())
            }
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository preloaded with [`sample_owners`].
    pub fn with_sample_data() -> Self {
        let repo = Self::new();
        for owner in sample_owners() {
            repo.insert_owner(owner);
        }
        repo
    }

    /// Add an owner directly, bypassing the async trait.
    ///
    /// Any id on `owner` is ignored; the assigned id is returned.
    pub fn insert_owner(&self, owner: Owner) -> OwnerId {
        self.data.write().insert(owner)
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of owners stored.
    pub fn owner_count(&self) -> usize {
        self.data.read().owners.len()
    }

    /// Check if an owner exists.
    pub fn has_owner(&self, owner_id: OwnerId) -> bool {
        self.data.read().owners.contains_key(&owner_id)
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OwnerRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn find_owners_by_last_name(&self, last_name: &str) -> RepositoryResult<Vec<Owner>> {
        let data = self.data.read();
        data.check_health()?;
        Ok(data.find_by_last_name(last_name))
    }

    async fn find_owner_by_id(&self, owner_id: OwnerId) -> RepositoryResult<Owner> {
        let data = self.data.read();
        data.check_health()?;
        data.find_by_id(owner_id)
    }

    async fn save_owner(&self, owner: &Owner) -> RepositoryResult<Owner> {
        let mut data = self.data.write();
        data.check_health()?;
        data.save(owner)
    }

    async fn count_owners(&self) -> RepositoryResult<usize> {
        let data = self.data.read();
        data.check_health()?;
        Ok(data.owners.len())
    }
}

/// Demo data set for local development.
///
/// Contains two owners sharing the last name "Davis", an internet number and
/// an owner outside the dialing-prefix table.
pub fn sample_owners() -> Vec<Owner> {
    vec![
        Owner::new("George", "Franklin", "110 W. Liberty St.", "Seoul", "6085551023"),
        Owner::new("Betty", "Davis", "638 Cardinal Ave.", "Busan", "6085551749"),
        Owner::new("Eduardo", "Rodriquez", "2693 Commerce St.", "Daegu", "6085558763"),
        Owner::new("Harold", "Davis", "563 Friendly St.", "Incheon", "6085553198"),
        Owner::new("Peter", "McTavish", "2387 S. Fair Way", "Gwangju", "0705552765"),
        Owner::new("Jean", "Coleman", "105 N. Lake St.", "Daejeon", "6085552654"),
        Owner::new("Jeff", "Black", "1450 Oak Blvd.", "Ulsan", "6085555387"),
        Owner::new("Maria", "Escobito", "345 Maple St.", "Jeju", "6085557683"),
        Owner::new("David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435"),
        Owner::new("Carlos", "Estaban", "2335 Independence La.", "Gyeonggi", "6085555487"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(last_name: &str) -> Owner {
        Owner::new("First", last_name, "1 Main St.", "Seoul", "1234567")
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = LocalRepository::new();
        assert_eq!(repo.insert_owner(owner("A")), OwnerId(1));
        assert_eq!(repo.insert_owner(owner("B")), OwnerId(2));
        assert_eq!(repo.count_owners().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_by_last_name_is_prefix_match() {
        let repo = LocalRepository::new();
        repo.insert_owner(owner("Davis"));
        repo.insert_owner(owner("Davidson"));
        repo.insert_owner(owner("Franklin"));

        let found = repo.find_owners_by_last_name("Dav").await.unwrap();
        assert_eq!(found.len(), 2);

        let found = repo.find_owners_by_last_name("davis").await.unwrap();
        assert!(found.is_empty());

        let all = repo.find_owners_by_last_name("").await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_returned_owners_are_copies() {
        let repo = LocalRepository::new();
        let id = repo.insert_owner(owner("Davis"));

        let mut found = repo.find_owners_by_last_name("Davis").await.unwrap();
        found[0].telephone = "changed".to_string();

        let stored = repo.find_owner_by_id(id).await.unwrap();
        assert_eq!(stored.telephone, "1234567");
    }

    #[tokio::test]
    async fn test_save_inserts_then_updates() {
        let repo = LocalRepository::new();
        let saved = repo.save_owner(&owner("Davis")).await.unwrap();
        let id = saved.id.unwrap();

        let mut edited = saved.clone();
        edited.city = "Busan".to_string();
        repo.save_owner(&edited).await.unwrap();

        assert_eq!(repo.find_owner_by_id(id).await.unwrap().city, "Busan");
        assert_eq!(repo.owner_count(), 1);
    }

    #[tokio::test]
    async fn test_save_unknown_id_is_not_found() {
        let repo = LocalRepository::new();
        let ghost = owner("Ghost").with_id(OwnerId(99));
        let err = repo.save_owner(&ghost).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails_lookups() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        let err = repo.find_owners_by_last_name("").await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_clear_resets_ids() {
        let repo = LocalRepository::with_sample_data();
        assert_eq!(repo.owner_count(), sample_owners().len());
        repo.clear();
        assert_eq!(repo.owner_count(), 0);
        assert_eq!(repo.insert_owner(owner("A")), OwnerId(1));
    }

    #[test]
    fn test_from_owners_keeps_ids_and_continues_counter() {
        let data =
            LocalData::from_owners(vec![owner("A").with_id(OwnerId(5)), owner("B")]).unwrap();
        assert!(data.owners.contains_key(&OwnerId(5)));
        assert!(data.owners.contains_key(&OwnerId(6)));
        assert_eq!(data.next_owner_id, OwnerId(7));
    }

    #[test]
    fn test_from_owners_rejects_duplicate_ids() {
        let err = LocalData::from_owners(vec![
            owner("A").with_id(OwnerId(3)),
            owner("B").with_id(OwnerId(3)),
        ])
        .unwrap_err();
        assert!(matches!(err, RepositoryError::StorageError { .. }));
        assert_eq!(err.context().entity_id.as_deref(), Some("3"));
    }
}
