//! Client for the formalization backend.
//!
//! Each resource family is a trait so the feed, chat thread and CLI can be
//! exercised against in-memory fakes. [`HttpBackend`] implements all of them
//! over HTTP.

mod error;
mod http;

pub use error::ApiError;
pub use http::HttpBackend;

use async_trait::async_trait;

use crate::models::{
    AgenticLog, Atom, ChatMessage, CreateChatMessage, CreateRegulationFragment, CreateRule,
    ExampleSet, FragmentId, LogOrder, Price, PrologQuery, PrologResponse, RegenerateFeedback,
    RegulationFragment, Rule, RuleId, UpdateRule,
};

#[async_trait]
pub trait FragmentApi: Send + Sync {
    async fn list_fragments(&self) -> Result<Vec<RegulationFragment>, ApiError>;

    async fn get_fragment(&self, id: FragmentId) -> Result<RegulationFragment, ApiError>;

    async fn create_fragment(
        &self,
        fragment: &CreateRegulationFragment,
    ) -> Result<RegulationFragment, ApiError>;

    async fn delete_fragment(&self, id: FragmentId) -> Result<(), ApiError>;

    /// Estimated price of the tokens spent on the fragment.
    async fn fragment_cost(&self, id: FragmentId) -> Result<Price, ApiError>;

    /// The full program (declarations and rules) the backend reasons over.
    async fn formalism_text(&self, id: FragmentId) -> Result<String, ApiError>;
}

#[async_trait]
pub trait AtomApi: Send + Sync {
    async fn list_atoms(&self, fragment: FragmentId) -> Result<Vec<Atom>, ApiError>;

    async fn generate_atoms(&self, fragment: FragmentId) -> Result<(), ApiError>;

    async fn regenerate_atoms(
        &self,
        fragment: FragmentId,
        feedback: &RegenerateFeedback,
    ) -> Result<(), ApiError>;

    async fn delete_atoms(&self, fragment: FragmentId) -> Result<(), ApiError>;
}

#[async_trait]
pub trait RuleApi: Send + Sync {
    async fn list_rules(&self, fragment: FragmentId) -> Result<Vec<Rule>, ApiError>;

    async fn generate_rules(&self, fragment: FragmentId) -> Result<(), ApiError>;

    async fn regenerate_rules(
        &self,
        fragment: FragmentId,
        feedback: &RegenerateFeedback,
    ) -> Result<(), ApiError>;

    async fn delete_rules(&self, fragment: FragmentId) -> Result<(), ApiError>;

    async fn create_rule(&self, rule: &CreateRule) -> Result<Rule, ApiError>;

    async fn update_rule(&self, id: RuleId, update: &UpdateRule) -> Result<Rule, ApiError>;

    async fn delete_rule(&self, id: RuleId) -> Result<(), ApiError>;
}

#[async_trait]
pub trait ReasoningApi: Send + Sync {
    /// Run the fragment's program against user supplied facts.
    async fn run_example(
        &self,
        fragment: FragmentId,
        query: &PrologQuery,
    ) -> Result<PrologResponse, ApiError>;

    async fn generate_examples(&self, fragment: FragmentId) -> Result<ExampleSet, ApiError>;
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn chat_messages(&self, regulation: FragmentId) -> Result<Vec<ChatMessage>, ApiError>;

    async fn send_chat_message(
        &self,
        regulation: FragmentId,
        message: &CreateChatMessage,
    ) -> Result<ChatMessage, ApiError>;
}

/// One page request against the agentic log of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogPage {
    /// Id of the entry the page starts after (or before, for `Desc`).
    pub cursor: Option<i64>,
    pub limit: Option<u32>,
    pub order: LogOrder,
}

#[async_trait]
pub trait AgenticLogApi: Send + Sync {
    async fn agentic_logs(
        &self,
        fragment: FragmentId,
        page: LogPage,
    ) -> Result<Vec<AgenticLog>, ApiError>;
}

/// Everything the CLI needs from a backend.
pub trait Backend: FragmentApi + AtomApi + RuleApi + ReasoningApi + ChatApi + AgenticLogApi {}

impl<T> Backend for T where T: FragmentApi + AtomApi + RuleApi + ReasoningApi + ChatApi + AgenticLogApi
{}
