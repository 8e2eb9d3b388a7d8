use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Agent {
    User,
    Agent,
}

/// A message in the assistant chat attached to a regulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    pub content: String,
    pub agent: Agent,
}

/// Payload for posting a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChatMessage {
    pub content: String,
}
