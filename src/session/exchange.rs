//! The async driver for one exchange: stream the response from the
//! remote client into the session's placeholder, then fire the
//! best-effort summary update. Shared by the HTTP API and the
//! terminal REPL.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use tokio::sync::mpsc;

use super::core::{ChatSession, ExchangeStart};
use crate::gemini::GeminiClient;

pub type SharedSession = Arc<RwLock<ChatSession>>;

/// Events forwarded to the caller while an exchange runs. The
/// channel closes after `Done` or `Error`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeEvent {
    Delta { text: String },
    Done,
    Error { message: String },
}

/// Run a started exchange to completion. Deltas are applied to the
/// session under a short-lived lock and forwarded to `tx` in arrival
/// order. On failure the placeholder is removed and the error is
/// recorded as the session's current error; the summary update only
/// runs after a successful exchange.
pub async fn run_exchange(
    session: SharedSession,
    client: GeminiClient,
    start: ExchangeStart,
    tx: mpsc::UnboundedSender<ExchangeEvent>,
) {
    let (delta_tx, mut delta_rx) = mpsc::unbounded_channel::<String>();

    let apply_session = Arc::clone(&session);
    let placeholder_id = start.placeholder_id.clone();
    let forward_tx = tx.clone();
    let applier = tokio::spawn(async move {
        while let Some(delta) = delta_rx.recv().await {
            apply_session
                .write()
                .expect("Unable to write shared session")
                .apply_delta(&placeholder_id, &delta);
            let _ = forward_tx.send(ExchangeEvent::Delta { text: delta });
        }
    });

    let result = client
        .complete_streaming(&start.history, &start.message, delta_tx)
        .await;

    // The delta sender was moved into the client call, so once the
    // stream is over the applier drains the channel and exits.
    let _ = applier.await;

    match result {
        Ok(_) => {
            session
                .write()
                .expect("Unable to write shared session")
                .complete_exchange(&start.placeholder_id);
            let _ = tx.send(ExchangeEvent::Done);

            maybe_update_summary(&session, &client).await;
        }
        Err(e) => {
            tracing::error!("Chat exchange failed: {}", e);
            session
                .write()
                .expect("Unable to write shared session")
                .fail_exchange(&start.placeholder_id, e.clone());
            let _ = tx.send(ExchangeEvent::Error {
                message: e.to_string(),
            });
        }
    }
}

/// Regenerate the stored summary once the transcript has enough
/// eligible entries. Failures are logged and swallowed; they never
/// block or roll back the exchange that triggered them.
pub async fn maybe_update_summary(session: &SharedSession, client: &GeminiClient) {
    let history = {
        let session = session.read().expect("Unable to read shared session");
        if !session.needs_summary() {
            return;
        }
        session.remote_history()
    };

    match client.summarize(&history).await {
        Ok(Some(text)) => {
            session
                .write()
                .expect("Unable to write shared session")
                .set_summary(text);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("Failed to update summary: {}", e);
        }
    }
}
