//! Data Transfer Objects for the HTTP API.
//!
//! Owner records and form bodies are re-exported from the core library since
//! they already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{Owner, OwnerId};
pub use crate::services::{FieldError, OwnerForm};

/// Query parameters for `GET /owners`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FindOwnersQuery {
    /// Last-name prefix; absent means "every owner"
    #[serde(default, rename = "lastName")]
    pub last_name: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
