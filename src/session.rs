use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// In-memory chat history for one session. Append-only; insertion order is
/// the chronological order.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    chat_history: Vec<ConversationTurn>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.chat_history.push(ConversationTurn {
            role,
            content: content.into(),
        });
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.chat_history
    }

    pub fn len(&self) -> usize {
        self.chat_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chat_history.is_empty()
    }
}
