//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::OwnerRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Owner lookup and persistence
    pub repository: Arc<dyn OwnerRepository>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn OwnerRepository>) -> Self {
        Self { repository }
    }
}
