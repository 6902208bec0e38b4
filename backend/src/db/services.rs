//! High-level database service layer.
//!
//! Repository-agnostic operations used by the HTTP handlers. They add the
//! checks and logging that should be the same whatever backend is plugged in.
//!
//! # Usage
//!
//! ```no_run
//! use petclinic::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::with_sample_data();
//!
//!     let owners = services::find_owners_by_last_name(&repo, "Davis").await?;
//!     println!("Found {} owners", owners.len());
//!
//!     Ok(())
//! }
//! ```

use log::{debug, info};

use super::repository::{ErrorContext, OwnerRepository, RepositoryError, RepositoryResult};
use crate::api::{Owner, OwnerId};

// ==================== Health & Connection ====================

/// Check if the store is healthy.
pub async fn health_check<R: OwnerRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Owner Lookups ====================

/// Find owners by last-name prefix. Empty string matches all owners.
pub async fn find_owners_by_last_name<R: OwnerRepository + ?Sized>(
    repo: &R,
    last_name: &str,
) -> RepositoryResult<Vec<Owner>> {
    let owners = repo
        .find_owners_by_last_name(last_name)
        .await
        .map_err(|e| e.with_operation("find_owners_by_last_name"))?;
    debug!("last name '{}' matched {} owners", last_name, owners.len());
    Ok(owners)
}

/// Retrieve an owner by id.
pub async fn find_owner_by_id<R: OwnerRepository + ?Sized>(
    repo: &R,
    owner_id: OwnerId,
) -> RepositoryResult<Owner> {
    repo.find_owner_by_id(owner_id).await
}

// ==================== Owner Writes ====================

/// Store a new owner.
///
/// Any id on `owner` is discarded; the repository assigns a fresh one.
pub async fn create_owner<R: OwnerRepository + ?Sized>(
    repo: &R,
    owner: &Owner,
) -> RepositoryResult<Owner> {
    let mut owner = owner.clone();
    owner.id = None;
    let saved = repo.save_owner(&owner).await?;
    info!(
        "Created owner {} ({} {})",
        saved.id.map(|id| id.to_string()).unwrap_or_default(),
        saved.first_name,
        saved.last_name
    );
    Ok(saved)
}

/// Replace the stored owner `owner_id` with `owner`.
///
/// The id always comes from `owner_id`, never from the submitted record.
pub async fn update_owner<R: OwnerRepository + ?Sized>(
    repo: &R,
    owner_id: OwnerId,
    owner: &Owner,
) -> RepositoryResult<Owner> {
    let owner = owner.clone().with_id(owner_id);
    let saved = repo.save_owner(&owner).await.map_err(|e| match e {
        RepositoryError::NotFound { message, .. } => RepositoryError::not_found_with_context(
            message,
            ErrorContext::new("update_owner")
                .with_entity("owner")
                .with_entity_id(owner_id),
        ),
        other => other.with_operation("update_owner"),
    })?;
    info!("Updated owner {}", owner_id);
    Ok(saved)
}
