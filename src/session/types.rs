use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Bot,
}

impl MessageRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Bot => "Bot",
        }
    }
}

/// One transcript entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: MessageRole,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(id: String, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            role,
            timestamp: Local::now(),
        }
    }
}

/// A single conversation thread
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub user_id: Option<String>,
    pub title: String,
    /// Shared with older snapshots until the next append
    pub messages: Arc<Vec<Message>>,
    pub created_at: DateTime<Local>,
}

impl Session {
    pub fn new(id: String, user_id: Option<String>, title: String) -> Self {
        Self {
            id,
            user_id,
            title,
            messages: Arc::new(Vec::new()),
            created_at: Local::now(),
        }
    }

    /// Copy of this session with `message` appended
    pub fn with_message(&self, message: Message) -> Self {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.extend(self.messages.iter().cloned());
        messages.push(message);
        Self {
            messages: Arc::new(messages),
            ..self.clone()
        }
    }
}

/// Identity supplied by the external identity collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}
