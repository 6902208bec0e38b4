//! Public API surface for the Rust backend.
//!
//! This file consolidates the record types shared by the repository layer,
//! the service layer and the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

use serde::{Deserialize, Serialize};

/// Owner identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub i64);

impl OwnerId {
    pub fn new(value: i64) -> Self {
        OwnerId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OwnerId> for i64 {
    fn from(id: OwnerId) -> Self {
        id.0
    }
}

impl From<i64> for OwnerId {
    fn from(value: i64) -> Self {
        OwnerId(value)
    }
}

/// A clinic customer record.
///
/// `id` is `None` until the repository assigns one on first save, and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Database ID
    #[serde(default)]
    pub id: Option<OwnerId>,
    #[serde(default)]
    pub first_name: String,
    /// Search key for the find-owners flow
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    /// Region name, matched against the city dialing-prefix table
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub telephone: String,
}

impl Owner {
    /// Build an unsaved owner.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        telephone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            city: city.into(),
            telephone: telephone.into(),
        }
    }

    /// Return a copy carrying the given id.
    pub fn with_id(mut self, id: OwnerId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
