//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let owners = Router::new()
        .route("/owners", get(handlers::process_find_form))
        .route("/owners/find", get(handlers::init_find_form))
        .route(
            "/owners/new",
            get(handlers::init_creation_form).post(handlers::process_creation_form),
        )
        .route("/owners/{owner_id}", get(handlers::show_owner))
        .route(
            "/owners/{owner_id}/edit",
            get(handlers::init_update_owner_form).post(handlers::process_update_owner_form),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(owners)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
