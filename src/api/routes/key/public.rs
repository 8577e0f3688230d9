//! Public types for the credential API
use serde::{Deserialize, Serialize};

pub use crate::gemini::KeyCheck;

#[derive(Serialize)]
pub struct KeyStatus {
    pub configured: bool,
}

#[derive(Deserialize)]
pub struct KeyPayload {
    pub key: String,
}

#[derive(Serialize)]
pub struct KeyCleared {
    pub cleared: bool,
}
