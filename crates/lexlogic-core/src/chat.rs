//! Chat thread with optimistic sends.

use chrono::Utc;
use tracing::warn;

use crate::client::{ApiError, ChatApi};
use crate::models::{Agent, ChatMessage, CreateChatMessage, FragmentId};

/// Messages of one regulation's chat.
///
/// A sent message shows up immediately under a negative temporary id and is
/// swapped for the server's copy once the request succeeds, or removed again
/// when it fails.
pub struct ChatThread<C> {
    api: C,
    regulation: FragmentId,
    messages: Vec<ChatMessage>,
    next_temp_id: i64,
}

impl<C: ChatApi> ChatThread<C> {
    pub fn new(api: C, regulation: FragmentId) -> Self {
        Self {
            api,
            regulation,
            messages: Vec::new(),
            next_temp_id: -1,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Optimistic messages still waiting for the server.
    pub fn pending(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|m| m.id < 0)
    }

    pub async fn load(&mut self) -> Result<&[ChatMessage], ApiError> {
        self.messages = self.api.chat_messages(self.regulation).await?;
        Ok(&self.messages)
    }

    /// Send `content` as the user. On success the thread is reloaded so the
    /// agent's reply appears too.
    pub async fn send(&mut self, content: impl Into<String>) -> Result<ChatMessage, ApiError> {
        let content = content.into();
        let temp_id = self.next_temp_id;
        self.next_temp_id -= 1;

        self.messages.push(ChatMessage {
            id: temp_id,
            created_at: Utc::now(),
            content: content.clone(),
            agent: Agent::User,
        });

        let result = self
            .api
            .send_chat_message(self.regulation, &CreateChatMessage { content })
            .await;

        match result {
            Ok(sent) => {
                if let Some(slot) = self.messages.iter_mut().find(|m| m.id == temp_id) {
                    *slot = sent.clone();
                }
                if let Err(e) = self.load().await {
                    warn!(regulation = self.regulation, error = %e, "Failed to reload chat");
                }
                Ok(sent)
            }
            Err(e) => {
                self.messages.retain(|m| m.id != temp_id);
                Err(e)
            }
        }
    }
}
