//! Router for the settings blob (schema owned by the UI)

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::Value;

use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn settings_get(State(state): State<SharedState>) -> Json<Option<Value>> {
    let store = state
        .read()
        .expect("Unable to read shared state")
        .store
        .clone();
    Json(store.get_settings().await)
}

async fn settings_set(
    State(state): State<SharedState>,
    Json(settings): Json<Value>,
) -> impl IntoResponse {
    let store = state
        .read()
        .expect("Unable to read shared state")
        .store
        .clone();
    if store.set_settings(&settings).await {
        StatusCode::OK.into_response()
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save settings").into_response()
    }
}

/// Create the settings router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(settings_get).post(settings_set))
}
