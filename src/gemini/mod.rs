mod chat;
mod core;

pub use chat::{ChatError, GeminiClient, KeyCheck};
pub use self::core::{Content, GenerateContentRequest, GenerateContentResponse, Part};
