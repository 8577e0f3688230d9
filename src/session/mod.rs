mod core;
mod exchange;
mod models;

pub use self::core::{ChatSession, ExchangeStart};
pub use exchange::{ExchangeEvent, SharedSession, maybe_update_summary, run_exchange};
pub use models::{ChoiceOption, Message, MessageKind, Sender, Transcript};
