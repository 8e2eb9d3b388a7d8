use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FragmentId;

/// Who produced a logged prompt or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageSource {
    #[serde(rename = "SYSTEM")]
    SystemPrompt,
    #[serde(rename = "USER")]
    UserPrompt,
    #[serde(rename = "MODEL")]
    ModelResponse,
}

impl MessageSource {
    pub fn display_name(&self) -> &'static str {
        match self {
            MessageSource::SystemPrompt => "system",
            MessageSource::UserPrompt => "user",
            MessageSource::ModelResponse => "model",
        }
    }
}

/// One entry of the backend's record of LLM interactions for a fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgenticLog {
    pub id: i64,
    pub user_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub message_source: MessageSource,
    pub regulation_fragment_id: FragmentId,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_error: bool,
}

/// Sort direction for agentic log pages, relative to the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOrder {
    Asc,
    #[default]
    Desc,
}

impl LogOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOrder::Asc => "asc",
            LogOrder::Desc => "desc",
        }
    }
}
