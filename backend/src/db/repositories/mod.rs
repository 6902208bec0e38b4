//! Repository implementations module.
//!
//! This module contains the implementations of the `OwnerRepository` trait:
//! - `local`: In-memory implementation for unit testing and local development
//! - `file`: In-memory table persisted to a JSON file
pub mod file;
pub mod local;

pub use file::FileRepository;
pub use local::{sample_owners, LocalRepository};
