//! The core models for the chat transcript.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::gemini::Content;
use crate::prompt;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum MessageKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "choice_set")]
    ChoiceSet,
}

/// One button in a choice-set message. Immutable once created.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

/// One transcript entry. `text` is only mutated for the in-flight bot
/// placeholder while a stream is running; everything else is frozen
/// at creation.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub kind: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
    // Bootstrap entries are excluded from the remote-facing history
    // and stripped on the first real turn. An explicit flag instead
    // of reserved ids so a real message can never be mistaken for one.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bootstrap: bool,
}

impl Message {
    pub fn user_text(text: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender: Sender::User,
            kind: MessageKind::Text,
            text: Some(text.to_string()),
            options: None,
            bootstrap: false,
        }
    }

    pub fn bot_text(text: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender: Sender::Bot,
            kind: MessageKind::Text,
            text: Some(text.to_string()),
            options: None,
            bootstrap: false,
        }
    }

    /// The mutable placeholder appended before a remote call starts.
    pub fn bot_placeholder() -> Self {
        Self::bot_text("")
    }

    fn bootstrap_welcome() -> Self {
        Self {
            bootstrap: true,
            ..Self::bot_text(prompt::WELCOME_TEXT)
        }
    }

    fn bootstrap_choices() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender: Sender::Bot,
            kind: MessageKind::ChoiceSet,
            text: None,
            options: Some(
                prompt::BOOTSTRAP_CHOICES
                    .iter()
                    .map(|(label, value)| ChoiceOption {
                        label: label.to_string(),
                        value: value.to_string(),
                    })
                    .collect(),
            ),
            bootstrap: true,
        }
    }

    /// Whether this entry belongs in the remote-facing history.
    pub fn is_remote_eligible(&self) -> bool {
        self.kind == MessageKind::Text && !self.bootstrap
    }
}

#[derive(Default)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    /// A fresh transcript holding the two bootstrap entries: the
    /// welcome text and the initial choice-set.
    pub fn seeded() -> Self {
        Self(vec![Message::bootstrap_welcome(), Message::bootstrap_choices()])
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn push(&mut self, msg: Message) {
        self.0.push(msg)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Message> {
        self.0.iter_mut().find(|m| m.id == id)
    }

    pub fn remove(&mut self, id: &str) {
        self.0.retain(|m| m.id != id);
    }

    pub fn strip_bootstrap(&mut self) {
        self.0.retain(|m| !m.bootstrap);
    }

    /// Number of entries that count towards the summary threshold.
    pub fn eligible_len(&self) -> usize {
        self.0.iter().filter(|m| m.is_remote_eligible()).count()
    }

    /// Derive the remote-facing history: text entries only, bootstrap
    /// excluded, sender mapped to the remote role.
    pub fn remote_history(&self) -> Vec<Content> {
        self.0
            .iter()
            .filter(|m| m.is_remote_eligible())
            .map(|m| {
                let text = m.text.as_deref().unwrap_or_default();
                match m.sender {
                    Sender::User => Content::user(text),
                    Sender::Bot => Content::model(text),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_transcript_has_two_bootstrap_entries() {
        let transcript = Transcript::seeded();
        let messages = transcript.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.bootstrap));
        assert_eq!(messages[0].kind, MessageKind::Text);
        assert_eq!(messages[1].kind, MessageKind::ChoiceSet);
        assert_eq!(messages[1].options.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_remote_history_excludes_bootstrap_and_choice_sets() {
        let mut transcript = Transcript::seeded();
        transcript.push(Message::user_text("What if cars could fly?"));
        transcript.push(Message::bot_text("An inventive start!"));

        let history = transcript.remote_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role.as_deref(), Some("user"));
        assert_eq!(history[0].text(), "What if cars could fly?");
        assert_eq!(history[1].role.as_deref(), Some("model"));
    }

    #[test]
    fn test_strip_bootstrap_never_touches_real_messages() {
        let mut transcript = Transcript::seeded();
        transcript.push(Message::user_text("hello"));
        transcript.strip_bootstrap();

        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].sender, Sender::User);
    }

    #[test]
    fn test_eligible_len_counts_text_non_bootstrap_only() {
        let mut transcript = Transcript::seeded();
        assert_eq!(transcript.eligible_len(), 0);

        transcript.push(Message::user_text("a"));
        transcript.push(Message::bot_text("b"));
        assert_eq!(transcript.eligible_len(), 2);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user_text("same text");
        let b = Message::user_text("same text");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_bootstrap_flag_serialization() {
        let msg = Message::user_text("hi");
        let json = serde_json::to_value(&msg).unwrap();
        // The flag is omitted for real messages and defaulted on read
        assert!(json.get("bootstrap").is_none());

        let parsed: Message = serde_json::from_value(json).unwrap();
        assert!(!parsed.bootstrap);
    }
}
