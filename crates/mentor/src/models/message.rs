use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use uuid::Uuid;

use super::agent::AgentKind;

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A single entry in the conversation history. Messages are immutable
/// once created; the trailing slice of them forms the prompt context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentKind>,
}

impl ChatMessage {
    /// Create a new user message with a fresh id and the current timestamp
    pub fn user<S: Into<String>>(content: S) -> Self {
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            agent: None,
        }
    }

    /// Create a new assistant message attributed to the given agent
    pub fn assistant<S: Into<String>>(content: S, agent: AgentKind) -> Self {
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
            agent: Some(agent),
        }
    }
}
