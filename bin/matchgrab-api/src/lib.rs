//! matchgrab API - HTTP query service
//!
//! Three read-only endpoints over the match store plus a health probe:
//!
//! - `GET /accounts` - account ID to summoner name, from a full scan
//! - `GET /account/{id}` - every match the account played in
//! - `GET /match/{id}` - one match by ID

pub mod error;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use handlers::AppState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the API router over an opened store.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/accounts", get(handlers::list_accounts))
        .route("/account/{id}", get(handlers::account_matches))
        .route("/match/{id}", get(handlers::get_match))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
