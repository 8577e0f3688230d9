//! Request and response types for the Gemini `generateContent` API
//! along with the HTTP plumbing for single-shot and streaming calls.

use std::time::Duration;

use anyhow::{Error, Result, bail};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Part {
    pub text: String,
}

/// One turn of remote-facing history. `role` is `"user"` or
/// `"model"`; it is omitted for system instructions.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    pub fn model(text: &str) -> Self {
        Self {
            role: Some("model".to_string()),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    pub fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
}

#[derive(Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    #[allow(dead_code)]
    pub finish_reason: Option<String>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// The text of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.text())
    }
}

// Error payload returned with non-2xx statuses, e.g.
// {"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}
#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    message: String,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

fn endpoint(api_hostname: &str, model: &str, method: &str) -> String {
    format!(
        "{}/v1beta/models/{}:{}",
        api_hostname.trim_end_matches('/'),
        model,
        method
    )
}

async fn error_from_response(response: reqwest::Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(parsed) => anyhow::anyhow!("{}", parsed.error.message),
        Err(_) => anyhow::anyhow!("Request failed with status {}", status),
    }
}

/// Issue a single-shot content generation request and return the
/// parsed response.
pub async fn generate_content(
    request: &GenerateContentRequest,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<GenerateContentResponse, Error> {
    let url = endpoint(api_hostname, model, "generateContent");
    let response = reqwest::Client::new()
        .post(url)
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 2))
        .json(request)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let parsed = response.json().await?;
    Ok(parsed)
}

/// Issue a streaming content generation request. Each text delta is
/// forwarded to `tx` in arrival order and the fully accumulated text
/// is returned when the stream ends. A mid-stream failure aborts with
/// an error; whatever was accumulated so far is discarded by the
/// caller's error path.
pub async fn generate_content_stream(
    tx: mpsc::UnboundedSender<String>,
    request: &GenerateContentRequest,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<String, Error> {
    let url = format!(
        "{}?alt=sse",
        endpoint(api_hostname, model, "streamGenerateContent")
    );
    let response = reqwest::Client::new()
        .post(url)
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 5))
        .json(request)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let mut stream = response.bytes_stream();

    let mut content_buf = String::new();
    let mut buffer = String::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let chunk_str = std::str::from_utf8(&chunk)?;

        // Append new data to buffer. This is necessary to handle SSE
        // fragmentation over HTTP/2 frames. The server may terminate
        // lines with CRLF so normalize before splitting on events.
        buffer.push_str(&chunk_str.replace("\r\n", "\n"));

        // Process all complete SSE events from the buffer
        while let Some(event_end) = buffer.find("\n\n") {
            let event_data = buffer[..event_end].to_string();
            buffer = buffer[event_end + 2..].to_string();

            let event_data = event_data.trim();
            if event_data.is_empty() {
                continue;
            }

            // Parse SSE events
            if !event_data.starts_with("data: ") {
                continue;
            }

            // Extract the JSON payload (after "data: ")
            let data = event_data[6..].trim();
            if data.is_empty() {
                continue;
            }

            let chunk = serde_json::from_str::<GenerateContentResponse>(data).inspect_err(|e| {
                tracing::error!("Parsing stream chunk failed for {}\nError: {}", data, e)
            })?;

            if let Some(delta) = chunk.text()
                && !delta.is_empty()
            {
                content_buf += &delta;
                // The result is ignored here because the response
                // should finish accumulating even if the receiver
                // went away.
                let _ = tx.send(delta);
            }
        }
    }

    if content_buf.is_empty() {
        bail!("No content received from the stream");
    }

    Ok(content_buf)
}
