//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the database service layer.

pub mod owner_form;
pub mod owner_search;

#[cfg(test)]
#[path = "owner_search_tests.rs"]
mod owner_search_tests;

pub use owner_form::{FieldError, OwnerForm};
pub use owner_search::{annotate_telephone, city_prefix, search, Annotation, SearchResult};
