use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use lexlogic_core::client::ChatApi;
use lexlogic_core::models::{Agent, ChatMessage, CreateChatMessage, FragmentId};
use lexlogic_core::{ApiError, ChatThread};

/// Chat backend that answers every user message with an agent reply.
#[derive(Clone, Default)]
struct FakeChat {
    messages: Arc<Mutex<Vec<ChatMessage>>>,
    reject: bool,
}

fn message(id: i64, content: &str, agent: Agent) -> ChatMessage {
    ChatMessage {
        id,
        created_at: Utc::now(),
        content: content.to_string(),
        agent,
    }
}

#[async_trait]
impl ChatApi for FakeChat {
    async fn chat_messages(&self, _regulation: FragmentId) -> Result<Vec<ChatMessage>, ApiError> {
        Ok(self.messages.lock().unwrap().clone())
    }

    async fn send_chat_message(
        &self,
        _regulation: FragmentId,
        message_in: &CreateChatMessage,
    ) -> Result<ChatMessage, ApiError> {
        if self.reject {
            return Err(ApiError::Status {
                status: 500,
                message: "model unavailable".into(),
            });
        }
        let mut messages = self.messages.lock().unwrap();
        let next = messages.len() as i64 + 1;
        let sent = message(next, &message_in.content, Agent::User);
        messages.push(sent.clone());
        messages.push(message(next + 1, "Because tweety is a bird.", Agent::Agent));
        Ok(sent)
    }
}

#[tokio::test]
async fn test_send_replaces_optimistic_message_and_reloads() {
    let api = FakeChat::default();
    let mut thread = ChatThread::new(api.clone(), 3);
    thread.load().await.unwrap();
    assert!(thread.messages().is_empty());

    let sent = thread.send("Why does tweety fly?").await.unwrap();
    assert_eq!(sent.id, 1);
    assert_eq!(thread.pending().count(), 0);

    let contents: Vec<_> = thread.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["Why does tweety fly?", "Because tweety is a bird."]);
}

#[tokio::test]
async fn test_failed_send_rolls_back() {
    let api = FakeChat {
        reject: true,
        ..Default::default()
    };
    api.messages
        .lock()
        .unwrap()
        .push(message(1, "Hello", Agent::User));

    let mut thread = ChatThread::new(api, 3);
    thread.load().await.unwrap();

    let err = thread.send("Is this lost?").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(thread.messages().len(), 1);
    assert_eq!(thread.pending().count(), 0);
}

#[tokio::test]
async fn test_temporary_ids_are_negative_and_unique() {
    let api = FakeChat {
        reject: true,
        ..Default::default()
    };
    let mut thread = ChatThread::new(api, 3);

    // Each failed attempt consumes a fresh temporary id.
    assert!(thread.send("one").await.is_err());
    assert!(thread.send("two").await.is_err());
    assert!(thread.messages().is_empty());
}
