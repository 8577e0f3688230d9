//! Router for the credential API

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use super::public;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// Whether a credential is currently configured. The key itself is
/// never returned.
async fn key_status(State(state): State<SharedState>) -> axum::Json<public::KeyStatus> {
    let store = state
        .read()
        .expect("Unable to read shared state")
        .store
        .clone();
    axum::Json(public::KeyStatus {
        configured: store.exists().await,
    })
}

/// Store a credential
async fn key_set(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::KeyPayload>,
) -> impl IntoResponse {
    let store = state
        .read()
        .expect("Unable to read shared state")
        .store
        .clone();
    if store.set(&payload.key).await {
        StatusCode::OK.into_response()
    } else {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            "API key must be a non-empty string",
        )
            .into_response()
    }
}

/// Remove the stored credential
async fn key_clear(State(state): State<SharedState>) -> axum::Json<public::KeyCleared> {
    let store = state
        .read()
        .expect("Unable to read shared state")
        .store
        .clone();
    axum::Json(public::KeyCleared {
        cleared: store.clear().await,
    })
}

/// Validate a candidate credential against the live API
async fn key_test(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::KeyPayload>,
) -> axum::Json<public::KeyCheck> {
    let client = state
        .read()
        .expect("Unable to read shared state")
        .client
        .clone();
    axum::Json(client.test_credential(&payload.key).await)
}

/// Create the credential router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(key_status).post(key_set).delete(key_clear))
        .route("/test", post(key_test))
}
