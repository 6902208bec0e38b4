//! View selection for owner pages.
//!
//! Handlers answer with either a rendered view (view name plus model, sent
//! as JSON for the presentation layer) or a redirect to another page.

use axum::{
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::AppError;
use crate::api::OwnerId;
use crate::services::FieldError;

pub const CREATE_OR_UPDATE_OWNER_FORM: &str = "owners/createOrUpdateOwnerForm";
pub const FIND_OWNERS: &str = "owners/findOwners";
pub const OWNERS_LIST: &str = "owners/ownersList";
pub const OWNER_DETAILS: &str = "owners/ownerDetails";

/// A view name with the model it should be rendered with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub view: String,
    #[serde(default)]
    pub model: Map<String, Value>,
    /// Field-level binding or search errors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ViewModel {
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            model: Map::new(),
            errors: Vec::new(),
        }
    }

    /// Add a model attribute.
    pub fn with<T: Serialize>(mut self, key: &str, value: &T) -> Result<Self, AppError> {
        let value = serde_json::to_value(value).map_err(|e| {
            AppError::Internal(format!("Failed to serialize model attribute '{}': {}", key, e))
        })?;
        self.model.insert(key.to_string(), value);
        Ok(self)
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors.extend(errors);
        self
    }
}

/// Handler outcome: render a view or redirect.
#[derive(Debug)]
pub enum ViewResponse {
    Render(ViewModel),
    Redirect(String),
}

impl ViewResponse {
    /// Redirect to an owner's details page.
    pub fn to_owner(owner_id: OwnerId) -> Self {
        ViewResponse::Redirect(format!("/owners/{}", owner_id))
    }
}

impl From<ViewModel> for ViewResponse {
    fn from(view: ViewModel) -> Self {
        ViewResponse::Render(view)
    }
}

impl IntoResponse for ViewResponse {
    fn into_response(self) -> Response {
        match self {
            ViewResponse::Render(view) => Json(view).into_response(),
            ViewResponse::Redirect(location) => Redirect::to(&location).into_response(),
        }
    }
}
