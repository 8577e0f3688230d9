use std::sync::{Arc, RwLock};

use tokio_rusqlite::Connection;

use crate::core::AppConfig;
use crate::gemini::GeminiClient;
use crate::session::{ChatSession, SharedSession};
use crate::store::CredentialStore;

pub struct AppState {
    // One transcript per server process; the session carries its own
    // lock so exchange tasks can mutate it without holding the app
    // state lock across await points
    pub session: SharedSession,
    pub store: CredentialStore,
    pub client: GeminiClient,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: Connection, config: AppConfig) -> Self {
        let store = CredentialStore::new(db);
        let client = GeminiClient::new(store.clone(), &config);
        Self {
            session: Arc::new(RwLock::new(ChatSession::new())),
            store,
            client,
            config,
        }
    }
}
