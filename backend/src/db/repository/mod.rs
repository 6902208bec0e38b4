//! Repository trait definitions for database operations.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`owner`]: Lookup and save operations for owner records
//!
//! The HTTP state and the service layer hold repositories as
//! `Arc<dyn OwnerRepository>`, so any backend can be swapped in at startup.

pub mod error;
pub mod owner;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use owner::OwnerRepository;
