//! Persistent storage for the API credential and the user settings
//! blob. Reads never error: a missing or unreadable value is reported
//! as absent so callers can treat the credential as a simple
//! precondition.

mod db;

use serde_json::Value;
use tokio_rusqlite::Connection;

const CREDENTIAL_KEY: &str = "davinci_gemini_api_key";
const SETTINGS_KEY: &str = "davinci_user_settings";

#[derive(Clone)]
pub struct CredentialStore {
    db: Connection,
}

impl CredentialStore {
    pub fn new(db: Connection) -> Self {
        Self { db }
    }

    /// Read the stored credential. Storage failures are logged and
    /// reported as absent, never propagated.
    pub async fn get(&self) -> Option<String> {
        match db::kv_get(&self.db, CREDENTIAL_KEY).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read credential: {}", e);
                None
            }
        }
    }

    /// Store the credential. Rejects empty input.
    pub async fn set(&self, value: &str) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        match db::kv_set(&self.db, CREDENTIAL_KEY, value).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save credential: {}", e);
                false
            }
        }
    }

    pub async fn clear(&self) -> bool {
        match db::kv_delete(&self.db, CREDENTIAL_KEY).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to clear credential: {}", e);
                false
            }
        }
    }

    pub async fn exists(&self) -> bool {
        self.get().await.is_some()
    }

    /// Read the settings blob. The schema is owned by the UI; a value
    /// that fails to parse is treated as absent.
    pub async fn get_settings(&self) -> Option<Value> {
        match db::kv_get(&self.db, SETTINGS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Stored settings are not valid JSON: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read settings: {}", e);
                None
            }
        }
    }

    pub async fn set_settings(&self, settings: &Value) -> bool {
        match db::kv_set(&self.db, SETTINGS_KEY, &settings.to_string()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save settings: {}", e);
                false
            }
        }
    }
}
