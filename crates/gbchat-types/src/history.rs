use thiserror::Error;

use crate::{Message, Role};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("a system message may only be the first message (history has {len} messages)")]
    MisplacedSystemMessage { len: usize },
}

/// Ordered message log replayed to the API as context on every turn.
///
/// Holds at most one system message, always at index 0. The log is never
/// truncated except by [`ConversationHistory::clear_preserving_system`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a history with a system prompt. An empty prompt seeds nothing.
    pub fn with_system_prompt(prompt: &str) -> Self {
        let mut history = Self::new();
        if !prompt.is_empty() {
            history.messages.push(Message::system(prompt));
        }
        history
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Result<(), HistoryError> {
        if role == Role::System && !self.messages.is_empty() {
            return Err(HistoryError::MisplacedSystemMessage {
                len: self.messages.len(),
            });
        }
        self.messages.push(Message::new(role, content));
        Ok(())
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Drop every message except the leading system message, if any.
    pub fn clear_preserving_system(&mut self) {
        let keep = usize::from(self.system_message().is_some());
        self.messages.truncate(keep);
    }

    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn system_message(&self) -> Option<&Message> {
        self.messages.first().filter(|m| m.role() == Role::System)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
