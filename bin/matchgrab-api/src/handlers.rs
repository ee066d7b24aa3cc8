//! Axum handlers for the match query API.
//!
//! Store access is blocking, so every query runs on the blocking pool with
//! its own read transaction. Nothing is cached between requests.

use crate::error::ApiError;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use matchgrab_store::{MatchStore, QueryEngine};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

type Result<T> = std::result::Result<T, ApiError>;

/// Shared state for handlers
pub struct AppState {
    pub store: MatchStore,
}

impl AppState {
    #[must_use]
    pub const fn new(store: MatchStore) -> Self {
        Self { store }
    }
}

/// Run a query against the store off the async workers.
async fn run_query<T, F>(state: Arc<AppState>, query: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(QueryEngine<&MatchStore>) -> matchgrab_common::Result<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || query(QueryEngine::new(&state.store))).await?;
    Ok(result?)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    matches: u64,
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let matches = tokio::task::spawn_blocking(move || state.store.count()).await??;
    Ok(Json(HealthResponse {
        status: "ok",
        matches,
    }))
}

/// GET /accounts
///
/// Requires a full scan of the store.
pub async fn list_accounts(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let accounts = run_query(state, |engine| engine.list_accounts()).await?;
    debug!("Returning {} accounts", accounts.len());
    Ok(Json(accounts))
}

/// GET /account/{id}
///
/// Requires a full scan of the store.
pub async fn account_matches(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let matches = run_query(state, move |engine| engine.matches_for_account(account_id)).await?;
    debug!("Account {} played in {} matches", account_id, matches.len());
    Ok(Json(matches))
}

/// GET /match/{id}
pub async fn get_match(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let record = run_query(state, move |engine| engine.match_by_id(match_id)).await?;
    Ok(Json(record))
}
