//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::session::{ChoiceOption, Message};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Payload for submitting one of the bootstrap choice buttons. Same
/// shape as the options the transcript hands out.
pub type ChoiceRequest = ChoiceOption;

#[derive(Serialize)]
pub struct TranscriptResponse {
    pub messages: Vec<Message>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: Option<String>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub busy: bool,
    pub error: Option<String>,
}
