//! Owner repository trait for lookup and persistence operations.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Owner, OwnerId};

/// Repository trait for owner records.
///
/// Every lookup returns owned copies. Callers may mutate them freely; nothing
/// reaches the store unless it is passed back through [`save_owner`].
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
///
/// [`save_owner`]: OwnerRepository::save_owner
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Find owners whose last name starts with `last_name`.
    ///
    /// An empty string matches every owner. The match is case-sensitive and
    /// the result is ordered by id. No match yields an empty vector.
    async fn find_owners_by_last_name(&self, last_name: &str) -> RepositoryResult<Vec<Owner>>;

    /// Retrieve a single owner by ID.
    ///
    /// # Returns
    /// * `Ok(Owner)` - The owner
    /// * `Err(RepositoryError::NotFound)` - If no owner has that id
    async fn find_owner_by_id(&self, owner_id: OwnerId) -> RepositoryResult<Owner>;

    /// Insert or update an owner.
    ///
    /// Owners without an id are inserted and receive a fresh one. Owners with
    /// an id replace the stored record; an unknown id is `NotFound`.
    ///
    /// # Returns
    /// * `Ok(Owner)` - The stored owner, id always set
    async fn save_owner(&self, owner: &Owner) -> RepositoryResult<Owner>;

    /// Number of stored owners.
    async fn count_owners(&self) -> RepositoryResult<usize>;
}
