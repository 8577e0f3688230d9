pub mod api;
pub mod cli;
pub mod core;
pub mod gemini;
pub mod prompt;
pub mod session;
pub mod store;
