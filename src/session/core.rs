//! The transcript state machine. One `ChatSession` owns the message
//! list, the current summary, and the single current-error slot for
//! one user session. All transitions are synchronous; the async
//! exchange driver in `session::exchange` calls into them around the
//! remote call.

use super::models::{ChoiceOption, Message, Transcript};
use crate::gemini::{ChatError, Content};

/// Everything the exchange driver needs to run the remote call for a
/// turn that was just started.
#[derive(Debug)]
pub struct ExchangeStart {
    pub placeholder_id: String,
    pub history: Vec<Content>,
    pub message: String,
}

pub struct ChatSession {
    transcript: Transcript,
    summary: Option<String>,
    last_error: Option<ChatError>,
    in_flight: Option<String>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::seeded(),
            summary: None,
            last_error: None,
            in_flight: None,
        }
    }

    /// Replace the transcript with the two bootstrap entries and
    /// clear the summary and error. Any in-flight exchange is
    /// abandoned; its placeholder id no longer resolves so late
    /// deltas fall on the floor.
    pub fn reset(&mut self) {
        self.transcript = Transcript::seeded();
        self.summary = None;
        self.last_error = None;
        self.in_flight = None;
    }

    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&ChatError> {
        self.last_error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Record a failure that happened before any mutation, e.g. the
    /// missing-credential guard. Overwrites the current error.
    pub fn record_error(&mut self, err: ChatError) {
        self.last_error = Some(err);
    }

    /// Start a text exchange. Returns `None` without mutating
    /// anything when the input is empty/whitespace or another
    /// exchange is already in flight.
    ///
    /// The remote history is captured from the transcript *before*
    /// the new user message is appended, so the just-sent message is
    /// not part of its own turn's history payload.
    pub fn begin_user_turn(&mut self, text: &str) -> Option<ExchangeStart> {
        if text.trim().is_empty() || self.is_busy() {
            return None;
        }
        let history = self.transcript.remote_history();
        self.start_exchange(text, history)
    }

    /// Start a choice exchange: the option's label is echoed as the
    /// user message and the remote call carries no prior context.
    pub fn begin_choice_turn(&mut self, option: &ChoiceOption) -> Option<ExchangeStart> {
        if self.is_busy() {
            return None;
        }
        self.start_exchange(&option.label, Vec::new())
    }

    fn start_exchange(&mut self, message: &str, history: Vec<Content>) -> Option<ExchangeStart> {
        self.last_error = None;
        self.transcript.strip_bootstrap();
        self.transcript.push(Message::user_text(message));

        let placeholder = Message::bot_placeholder();
        let placeholder_id = placeholder.id.clone();
        self.transcript.push(placeholder);
        self.in_flight = Some(placeholder_id.clone());

        Some(ExchangeStart {
            placeholder_id,
            history,
            message: message.to_string(),
        })
    }

    /// Append a streamed delta to the in-flight placeholder. Deltas
    /// for anything other than the current placeholder are ignored,
    /// which covers late arrivals after a reset.
    pub fn apply_delta(&mut self, placeholder_id: &str, delta: &str) {
        if self.in_flight.as_deref() != Some(placeholder_id) {
            return;
        }
        if let Some(msg) = self.transcript.find_mut(placeholder_id) {
            let text = msg.text.get_or_insert_with(String::new);
            text.push_str(delta);
        }
    }

    /// Mark the in-flight placeholder complete; it is immutable from
    /// here on.
    pub fn complete_exchange(&mut self, placeholder_id: &str) {
        if self.in_flight.as_deref() == Some(placeholder_id) {
            self.in_flight = None;
        }
    }

    /// Remove the in-flight placeholder and record the failure so the
    /// transcript shows no dangling empty turn.
    pub fn fail_exchange(&mut self, placeholder_id: &str, err: ChatError) {
        if self.in_flight.as_deref() != Some(placeholder_id) {
            return;
        }
        self.transcript.remove(placeholder_id);
        self.in_flight = None;
        self.last_error = Some(err);
    }

    /// Whether the transcript has enough eligible entries for the
    /// summary trigger to fire.
    pub fn needs_summary(&self) -> bool {
        self.transcript.eligible_len() >= 3
    }

    pub fn remote_history(&self) -> Vec<Content> {
        self.transcript.remote_history()
    }

    pub fn set_summary(&mut self, text: String) {
        self.summary = Some(text);
    }
}
