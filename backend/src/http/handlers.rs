//! HTTP handlers for the owner pages.
//!
//! Each handler corresponds to a route and delegates to the service layer for
//! business logic, then picks the view to render or the page to redirect to.

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, Query, State,
    },
    Form, Json,
};

use super::dto::{FindOwnersQuery, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use super::view::{
    ViewModel, ViewResponse, CREATE_OR_UPDATE_OWNER_FORM, FIND_OWNERS, OWNERS_LIST,
    OWNER_DETAILS,
};
use crate::api::{Owner, OwnerId};
use crate::db::services as db_services;
use crate::services::{owner_search, FieldError, OwnerForm, SearchResult};

/// Result type for page handlers.
pub type ViewResult = Result<ViewResponse, AppError>;

/// Owner id from the path; non-numeric segments become a JSON 400.
type OwnerPath = Result<Path<i64>, PathRejection>;

/// Submitted owner form; undecodable bodies become a JSON 400.
type OwnerFormBody = Result<Form<OwnerForm>, FormRejection>;

fn path_owner_id(path: OwnerPath) -> Result<OwnerId, AppError> {
    let Path(owner_id) = path?;
    Ok(OwnerId::new(owner_id))
}

fn saved_id(owner: &Owner) -> Result<OwnerId, AppError> {
    owner
        .id
        .ok_or_else(|| AppError::Internal("Repository returned an owner without id".to_string()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Create
// =============================================================================

/// GET /owners/new
pub async fn init_creation_form() -> ViewResult {
    Ok(ViewModel::new(CREATE_OR_UPDATE_OWNER_FORM)
        .with("owner", &Owner::default())?
        .into())
}

/// POST /owners/new
///
/// Re-renders the form on binding errors, otherwise stores the owner and
/// redirects to its details page.
pub async fn process_creation_form(
    State(state): State<AppState>,
    form: OwnerFormBody,
) -> ViewResult {
    let Form(form) = form?;
    let errors = form.validate();
    if !errors.is_empty() {
        tracing::debug!("owner creation rejected with {} field errors", errors.len());
        return Ok(ViewModel::new(CREATE_OR_UPDATE_OWNER_FORM)
            .with("owner", &form)?
            .with_errors(errors)
            .into());
    }

    let saved = db_services::create_owner(state.repository.as_ref(), &form.into_owner()).await?;
    Ok(ViewResponse::to_owner(saved_id(&saved)?))
}

// =============================================================================
// Find
// =============================================================================

/// GET /owners/find
pub async fn init_find_form() -> ViewResult {
    Ok(ViewModel::new(FIND_OWNERS)
        .with("owner", &Owner::default())?
        .into())
}

/// GET /owners?lastName=
///
/// No match re-renders the search form with a `notFound` error on
/// `lastName`; one match redirects to that owner; several matches render the
/// list with regional telephone prefixes.
pub async fn process_find_form(
    State(state): State<AppState>,
    Query(query): Query<FindOwnersQuery>,
) -> ViewResult {
    let result = owner_search::search(state.repository.as_ref(), query.last_name.as_deref()).await?;

    match result {
        SearchResult::Empty => {
            let owner = Owner {
                last_name: query.last_name.unwrap_or_default(),
                ..Owner::default()
            };
            Ok(ViewModel::new(FIND_OWNERS)
                .with("owner", &owner)?
                .with_errors(vec![FieldError::not_found("lastName")])
                .into())
        }
        SearchResult::Single(owner) => Ok(ViewResponse::to_owner(saved_id(&owner)?)),
        SearchResult::Many(owners) => Ok(ViewModel::new(OWNERS_LIST)
            .with("selections", &owners)?
            .into()),
    }
}

// =============================================================================
// Update
// =============================================================================

/// GET /owners/{owner_id}/edit
pub async fn init_update_owner_form(State(state): State<AppState>, path: OwnerPath) -> ViewResult {
    let owner_id = path_owner_id(path)?;
    let owner = db_services::find_owner_by_id(state.repository.as_ref(), owner_id).await?;
    Ok(ViewModel::new(CREATE_OR_UPDATE_OWNER_FORM)
        .with("owner", &owner)?
        .into())
}

/// POST /owners/{owner_id}/edit
///
/// The stored id always comes from the path.
pub async fn process_update_owner_form(
    State(state): State<AppState>,
    path: OwnerPath,
    form: OwnerFormBody,
) -> ViewResult {
    let owner_id = path_owner_id(path)?;
    let Form(form) = form?;
    let errors = form.validate();
    if !errors.is_empty() {
        let owner = form.into_owner().with_id(owner_id);
        return Ok(ViewModel::new(CREATE_OR_UPDATE_OWNER_FORM)
            .with("owner", &owner)?
            .with_errors(errors)
            .into());
    }

    db_services::update_owner(state.repository.as_ref(), owner_id, &form.into_owner()).await?;
    Ok(ViewResponse::to_owner(owner_id))
}

// =============================================================================
// Details
// =============================================================================

/// GET /owners/{owner_id}
pub async fn show_owner(State(state): State<AppState>, path: OwnerPath) -> ViewResult {
    let owner_id = path_owner_id(path)?;
    let owner = db_services::find_owner_by_id(state.repository.as_ref(), owner_id).await?;
    Ok(ViewModel::new(OWNER_DETAILS)
        .with("owner", &owner)?
        .into())
}
