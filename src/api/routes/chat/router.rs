//! Router for the chat API

use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, sse::Event, sse::KeepAlive, sse::Sse},
    routing::{delete, get, post},
};
use tokio::sync::mpsc;
use tokio_stream::StreamExt as _;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::gemini::{ChatError, GeminiClient};
use crate::session::{ExchangeEvent, ExchangeStart, SharedSession, run_exchange};
use crate::store::CredentialStore;

type SharedState = Arc<RwLock<AppState>>;

fn session_parts(state: &SharedState) -> (SharedSession, CredentialStore, GeminiClient) {
    let shared_state = state.read().expect("Unable to read shared state");
    (
        Arc::clone(&shared_state.session),
        shared_state.store.clone(),
        shared_state.client.clone(),
    )
}

/// Spawn the exchange and stream its events back to the client.
fn exchange_response(
    session: SharedSession,
    client: GeminiClient,
    start: ExchangeStart,
) -> axum::response::Response {
    let (tx, rx) = mpsc::unbounded_channel::<ExchangeEvent>();
    let sse_stream =
        UnboundedReceiverStream::new(rx).map(|event| Event::default().json_data(event));

    tokio::spawn(run_exchange(session, client, start, tx));

    Sse::new(sse_stream)
        .keep_alive(
            KeepAlive::default()
                .text("keep-alive")
                .interval(Duration::from_millis(100)),
        )
        .into_response()
}

/// Submit a user message and stream the bot response as SSE events
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (session, store, client) = session_parts(&state);

    // The credential guard runs before any transcript mutation
    if !store.exists().await {
        session
            .write()
            .expect("Unable to write shared session")
            .record_error(ChatError::NoCredential);
        return Ok((StatusCode::CONFLICT, ChatError::NoCredential.to_string()).into_response());
    }

    let start = session
        .write()
        .expect("Unable to write shared session")
        .begin_user_turn(&payload.message);
    let Some(start) = start else {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            "Message is empty or another exchange is in flight",
        )
            .into_response());
    };

    Ok(exchange_response(session, client, start))
}

/// Submit a bootstrap choice button and stream the bot response
async fn choice_handler(
    State(state): State<SharedState>,
    axum::Json(option): axum::Json<public::ChoiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (session, store, client) = session_parts(&state);

    if !store.exists().await {
        session
            .write()
            .expect("Unable to write shared session")
            .record_error(ChatError::NoCredential);
        return Ok((StatusCode::CONFLICT, ChatError::NoCredential.to_string()).into_response());
    }

    let start = session
        .write()
        .expect("Unable to write shared session")
        .begin_choice_turn(&option);
    let Some(start) = start else {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            "Another exchange is in flight",
        )
            .into_response());
    };

    Ok(exchange_response(session, client, start))
}

/// Reseed the transcript and clear the summary and error
async fn reset_handler(State(state): State<SharedState>) -> StatusCode {
    let (session, _, _) = session_parts(&state);
    session
        .write()
        .expect("Unable to write shared session")
        .reset();
    StatusCode::OK
}

/// The current transcript in render order
async fn messages_handler(
    State(state): State<SharedState>,
) -> axum::Json<public::TranscriptResponse> {
    let (session, _, _) = session_parts(&state);
    let messages = session
        .read()
        .expect("Unable to read shared session")
        .messages()
        .to_vec();
    axum::Json(public::TranscriptResponse { messages })
}

/// The current conversation summary, if one has been generated
async fn summary_handler(
    State(state): State<SharedState>,
) -> axum::Json<public::SummaryResponse> {
    let (session, _, _) = session_parts(&state);
    let summary = session
        .read()
        .expect("Unable to read shared session")
        .summary()
        .map(str::to_string);
    axum::Json(public::SummaryResponse { summary })
}

/// Whether an exchange is in flight and the current error, if any
async fn status_handler(State(state): State<SharedState>) -> axum::Json<public::StatusResponse> {
    let (session, _, _) = session_parts(&state);
    let session = session.read().expect("Unable to read shared session");
    axum::Json(public::StatusResponse {
        busy: session.is_busy(),
        error: session.last_error().map(|e| e.to_string()),
    })
}

/// Dismiss the current error banner
async fn dismiss_error_handler(State(state): State<SharedState>) -> StatusCode {
    let (session, _, _) = session_parts(&state);
    session
        .write()
        .expect("Unable to write shared session")
        .dismiss_error();
    StatusCode::OK
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/choice", post(choice_handler))
        .route("/reset", post(reset_handler))
        .route("/messages", get(messages_handler))
        .route("/summary", get(summary_handler))
        .route("/status", get(status_handler))
        .route("/error", delete(dismiss_error_handler))
}
