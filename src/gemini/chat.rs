//! Chat-level operations on top of the Gemini wire layer: completing
//! an exchange, streaming it, summarizing a conversation under a
//! different persona, and validating a candidate credential.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;

use super::core::{
    Content, GenerateContentRequest, GenerationConfig, generate_content, generate_content_stream,
};
use crate::core::AppConfig;
use crate::prompt;
use crate::store::CredentialStore;

/// User-facing failures for the main exchange path. Everything else
/// stays `anyhow` internally.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ChatError {
    #[error("No API key configured. Please add your Google Gemini API key in Settings.")]
    NoCredential,
    #[error("{0}")]
    Remote(String),
}

/// Result of a credential test.
#[derive(Clone, Debug, Serialize)]
pub struct KeyCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct GeminiClient {
    store: CredentialStore,
    api_hostname: String,
    model: String,
    fallback_model: String,
    persona: String,
    summary_persona: String,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(store: CredentialStore, config: &AppConfig) -> Self {
        Self {
            store,
            api_hostname: config.api_hostname.clone(),
            model: config.primary_model.clone(),
            fallback_model: config.fallback_model.clone(),
            persona: config.persona.clone(),
            summary_persona: config.summary_persona.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }

    fn chat_request(&self, history: &[Content], message: &str) -> GenerateContentRequest {
        let mut contents = history.to_owned();
        contents.push(Content::user(message));
        GenerateContentRequest {
            system_instruction: Some(Content::system(&self.persona)),
            contents,
            generation_config: Some(GenerationConfig {
                max_output_tokens: self.max_output_tokens,
            }),
        }
    }

    async fn credential(&self) -> Result<String, ChatError> {
        self.store.get().await.ok_or(ChatError::NoCredential)
    }

    /// Run one exchange and return the full response text.
    pub async fn complete(&self, history: &[Content], message: &str) -> Result<String, ChatError> {
        let api_key = self.credential().await?;
        let request = self.chat_request(history, message);
        let response = generate_content(&request, &self.api_hostname, &api_key, &self.model)
            .await
            .map_err(|e| ChatError::Remote(e.to_string()))?;

        match response.text() {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ChatError::Remote("No response from the model".to_string())),
        }
    }

    /// Run one exchange, forwarding each text delta to `tx` in
    /// arrival order, and return the accumulated text. The channel
    /// closes when the sender is dropped, on stream end or error.
    pub async fn complete_streaming(
        &self,
        history: &[Content],
        message: &str,
        tx: mpsc::UnboundedSender<String>,
    ) -> Result<String, ChatError> {
        let api_key = self.credential().await?;
        let request = self.chat_request(history, message);
        generate_content_stream(tx, &request, &self.api_hostname, &api_key, &self.model)
            .await
            .map_err(|e| ChatError::Remote(e.to_string()))
    }

    /// Summarize a conversation under the observer persona.
    /// Returns `Ok(None)` when no credential is configured since
    /// summarization is best-effort and must never surface an error
    /// banner to the user.
    pub async fn summarize(&self, history: &[Content]) -> Result<Option<String>, ChatError> {
        let Some(api_key) = self.store.get().await else {
            return Ok(None);
        };

        // Serialize the history into a single text block for the
        // observer rather than passing it as turns
        let conversation = history
            .iter()
            .map(|content| {
                let role = content.role.as_deref().unwrap_or("user").to_uppercase();
                format!("{}: {}", role, content.text())
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        let message = format!("{}{}", prompt::SUMMARY_REQUEST, conversation);

        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(&self.summary_persona)),
            contents: vec![Content::user(&message)],
            generation_config: None,
        };
        let response = generate_content(&request, &self.api_hostname, &api_key, &self.model)
            .await
            .map_err(|e| ChatError::Remote(e.to_string()))?;

        Ok(response.text().filter(|text| !text.is_empty()))
    }

    /// Test a candidate credential with a throwaway prompt. Tries the
    /// primary model and, only if that attempt fails, retries exactly
    /// once with the fallback model before concluding invalid.
    pub async fn test_credential(&self, candidate: &str) -> KeyCheck {
        let request = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::user("test")],
            generation_config: None,
        };

        match generate_content(&request, &self.api_hostname, candidate, &self.model).await {
            Ok(response) if response.text().is_some_and(|text| !text.is_empty()) => {
                return KeyCheck {
                    valid: true,
                    error: None,
                };
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("{} failed, trying fallback: {}", self.model, e);
            }
        }

        match generate_content(&request, &self.api_hostname, candidate, &self.fallback_model).await
        {
            Ok(response) if response.text().is_some_and(|text| !text.is_empty()) => KeyCheck {
                valid: true,
                error: None,
            },
            Ok(_) => KeyCheck {
                valid: false,
                error: Some("No response from API".to_string()),
            },
            Err(e) => KeyCheck {
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}
