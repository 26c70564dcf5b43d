//! Chat transcript storage
//!
//! Ordered, append-only record of one chat session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// A single turn in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub turn_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub role: TurnRole,
    pub content: String,
    /// Reply id assigned by the advisory service, when it sends one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<String>,
    /// Synthetic assistant turn standing in for a failed request
    pub is_error: bool,
}

impl ChatTurn {
    fn new(role: TurnRole, content: String, reply_id: Option<String>, is_error: bool) -> Self {
        Self {
            turn_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            role,
            content,
            reply_id,
            is_error,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content.into(), None, false)
    }

    pub fn assistant(content: impl Into<String>, reply_id: Option<String>) -> Self {
        Self::new(TurnRole::Assistant, content.into(), reply_id, false)
    }

    /// Assistant turn carrying the user-facing failure message
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, message.into(), None, true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }
}
