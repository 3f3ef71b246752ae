//! HTTP API for taxonomy-scoped autocomplete.

pub mod config;
mod state;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use taxocomplete_matcher::{AutocompleteError, AutocompleteRequest};
use taxocomplete_types::TermId;
use tracing::{error, warn};

pub use state::{build_state, AppState};

/// Query string of an autocomplete request.
#[derive(Debug, Default, Deserialize)]
pub struct AutocompleteParams {
    pub q: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn autocomplete_handler(
    State(state): State<Arc<AppState>>,
    Path((target_type, selection_handler, selection_settings_key)): Path<(String, String, String)>,
    Query(params): Query<AutocompleteParams>,
) -> Response {
    respond(
        state,
        AutocompleteRequest {
            target_type,
            selection_handler,
            selection_settings_key,
            vocabulary: None,
            term: None,
            q: params.q,
        },
    )
    .await
}

async fn scoped_autocomplete_handler(
    State(state): State<Arc<AppState>>,
    Path((target_type, selection_handler, selection_settings_key, vocabulary, term)): Path<(
        String,
        String,
        String,
        String,
        TermId,
    )>,
    Query(params): Query<AutocompleteParams>,
) -> Response {
    respond(
        state,
        AutocompleteRequest {
            target_type,
            selection_handler,
            selection_settings_key,
            vocabulary: Some(vocabulary),
            term: Some(term),
            q: params.q,
        },
    )
    .await
}

/// Runs the synchronous pipeline off the async runtime and maps the outcome
/// to a response. Error responses carry no body.
async fn respond(state: Arc<AppState>, request: AutocompleteRequest) -> Response {
    let outcome = tokio::task::spawn_blocking(move || state.service().handle(&request)).await;
    match outcome {
        Ok(Ok(suggestions)) => Json(suggestions).into_response(),
        Ok(Err(err)) => status_for(&err).into_response(),
        Err(join_err) => {
            error!("autocomplete task failed: {join_err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Maps a pipeline failure to its HTTP status.
pub fn status_for(err: &AutocompleteError) -> StatusCode {
    match err {
        AutocompleteError::Unauthorized => StatusCode::FORBIDDEN,
        AutocompleteError::UnknownHandler { .. } => {
            warn!("{err}");
            StatusCode::NOT_FOUND
        }
        AutocompleteError::Authentication(_) | AutocompleteError::Match(_) => {
            error!("autocomplete failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Build the HTTP API router with the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/entityqueue_taxonomy/autocomplete/{target_type}/{selection_handler}/{selection_settings_key}",
            get(autocomplete_handler),
        )
        .route(
            "/entityqueue_taxonomy/autocomplete/{target_type}/{selection_handler}/{selection_settings_key}/{vocabulary}/{taxonomy_term}",
            get(scoped_autocomplete_handler),
        )
        .with_state(state)
}
