//! API routes module

pub mod chat;
pub mod key;
mod settings;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Chat routes
        .nest("/chat", chat::router())
        // Credential routes
        .nest("/key", key::router())
        // Settings blob routes
        .nest("/settings", settings::router())
}
