use anyhow::{Result, bail};
use clap::ValueEnum;

use crate::core::{AppConfig, db::async_db};
use crate::gemini::GeminiClient;
use crate::store::CredentialStore;

#[derive(Clone, Copy, ValueEnum)]
pub enum KeyAction {
    /// Store a key, replacing any existing one
    Set,
    /// Remove the stored key
    Clear,
    /// Validate a key against the live API
    Test,
    /// Show whether a key is configured
    Status,
}

pub async fn run(action: KeyAction, value: Option<String>) -> Result<()> {
    let config = AppConfig::default();
    let db = async_db(&config.db_path).await?;
    let store = CredentialStore::new(db);

    match action {
        KeyAction::Set => {
            let Some(value) = value else {
                bail!("--value is required for `set`");
            };
            if store.set(&value).await {
                println!("API key stored");
            } else {
                bail!("API key must be a non-empty string");
            }
        }
        KeyAction::Clear => {
            if store.clear().await {
                println!("API key cleared");
            } else {
                bail!("Failed to clear the API key");
            }
        }
        KeyAction::Status => {
            if store.exists().await {
                println!("An API key is configured");
            } else {
                println!("No API key is configured");
            }
        }
        KeyAction::Test => {
            let key = match value {
                Some(value) => value,
                None => match store.get().await {
                    Some(stored) => stored,
                    None => bail!("No --value given and no API key stored"),
                },
            };
            let client = GeminiClient::new(store, &config);
            let check = client.test_credential(&key).await;
            if check.valid {
                println!("API key is valid");
            } else {
                println!(
                    "API key is invalid: {}",
                    check.error.unwrap_or_else(|| "unknown error".to_string())
                );
            }
        }
    }

    Ok(())
}
