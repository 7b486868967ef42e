//! Conversation Log
//!
//! Append-only ordered message sequence used for display continuity. Purely
//! a projection; the pipeline is correct without it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who said a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One displayed message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Process-local monotonically increasing id; never reused.
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

const WELCOME: &str = "Welcome to AutoMate AI! I can help you manage your business operations \
through voice commands and image processing. What would you like to do today?";

/// Append-only conversation log.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    entries: Vec<ChatMessage>,
    next_id: u64,
}

impl ConversationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log seeded with the assistant welcome message.
    pub fn with_welcome() -> Self {
        let mut log = Self::new();
        log.assistant(WELCOME);
        log
    }

    /// Append a message and return its assigned id.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(ChatMessage {
            id,
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
        id
    }

    pub fn user(&mut self, content: impl Into<String>) -> u64 {
        self.append(Role::User, content)
    }

    pub fn assistant(&mut self, content: impl Into<String>) -> u64 {
        self.append(Role::Assistant, content)
    }

    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
