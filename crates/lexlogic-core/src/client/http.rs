use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    AgenticLogApi, ApiError, AtomApi, ChatApi, FragmentApi, LogPage, ReasoningApi, RuleApi,
};
use crate::config::BackendConfig;
use crate::models::{
    AgenticLog, Atom, ChatMessage, CreateChatMessage, CreateRegulationFragment, CreateRule,
    ExampleSet, FragmentId, Price, PrologQuery, PrologResponse, RegenerateFeedback,
    RegulationFragment, Rule, RuleId, UpdateRule,
};

/// reqwest-backed client for the formalization backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    /// Creates a client for the backend at `base_url`
    /// (e.g. "http://localhost:5000").
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_client(base_url, Client::new())
    }

    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, client)
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ApiError> {
        Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    fn with_client(base_url: impl Into<String>, client: Client) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let parsed =
            Url::parse(&base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(format!(
                "{base_url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Request helpers
    // ========================================================================

    /// Sends the request and turns non-2xx responses into [`ApiError::Status`].
    async fn execute(&self, request: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(path, status = status.as_u16(), "Backend request");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(self.client.get(self.url(path)), path).await?;
        Self::decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        let response = self.execute(request, path).await?;
        Self::decode(response).await
    }

    /// POST whose response body is ignored.
    async fn post_unit<B>(&self, path: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request, path).await.map(|_| ())
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.client.put(self.url(path)).json(body);
        let response = self.execute(request, path).await?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.client.delete(self.url(path)), path)
            .await
            .map(|_| ())
    }
}

/// Prefers the `error` field of a JSON error body over the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[derive(Debug, Deserialize)]
struct FormalismText {
    text: String,
}

// ============================================================================
// Resource implementations
// ============================================================================

#[async_trait]
impl FragmentApi for HttpBackend {
    async fn list_fragments(&self) -> Result<Vec<RegulationFragment>, ApiError> {
        self.get("/regulation-fragments").await
    }

    async fn get_fragment(&self, id: FragmentId) -> Result<RegulationFragment, ApiError> {
        self.get(&format!("/regulation-fragments/{id}")).await
    }

    async fn create_fragment(
        &self,
        fragment: &CreateRegulationFragment,
    ) -> Result<RegulationFragment, ApiError> {
        self.post("/regulation-fragments", fragment).await
    }

    async fn delete_fragment(&self, id: FragmentId) -> Result<(), ApiError> {
        self.delete(&format!("/regulation-fragments/{id}")).await
    }

    async fn fragment_cost(&self, id: FragmentId) -> Result<Price, ApiError> {
        self.get(&format!("/regulation-fragments/{id}/cost")).await
    }

    async fn formalism_text(&self, id: FragmentId) -> Result<String, ApiError> {
        let body: FormalismText = self
            .get(&format!("/regulation-fragments/{id}/formalism"))
            .await?;
        Ok(body.text)
    }
}

#[async_trait]
impl AtomApi for HttpBackend {
    async fn list_atoms(&self, fragment: FragmentId) -> Result<Vec<Atom>, ApiError> {
        self.get(&format!("/regulation-fragments/{fragment}/atoms"))
            .await
    }

    async fn generate_atoms(&self, fragment: FragmentId) -> Result<(), ApiError> {
        self.post_unit::<()>(
            &format!("/regulation-fragments/{fragment}/atoms/generate"),
            None,
        )
        .await
    }

    async fn regenerate_atoms(
        &self,
        fragment: FragmentId,
        feedback: &RegenerateFeedback,
    ) -> Result<(), ApiError> {
        self.post_unit(
            &format!("/regulation-fragments/{fragment}/atoms/regenerate"),
            Some(feedback),
        )
        .await
    }

    async fn delete_atoms(&self, fragment: FragmentId) -> Result<(), ApiError> {
        self.delete(&format!("/regulation-fragments/{fragment}/atoms"))
            .await
    }
}

#[async_trait]
impl RuleApi for HttpBackend {
    async fn list_rules(&self, fragment: FragmentId) -> Result<Vec<Rule>, ApiError> {
        self.get(&format!("/regulation-fragments/{fragment}/rules"))
            .await
    }

    async fn generate_rules(&self, fragment: FragmentId) -> Result<(), ApiError> {
        self.post_unit::<()>(
            &format!("/regulation-fragments/{fragment}/rules/generate"),
            None,
        )
        .await
    }

    async fn regenerate_rules(
        &self,
        fragment: FragmentId,
        feedback: &RegenerateFeedback,
    ) -> Result<(), ApiError> {
        self.post_unit(
            &format!("/regulation-fragments/{fragment}/rules/regenerate"),
            Some(feedback),
        )
        .await
    }

    async fn delete_rules(&self, fragment: FragmentId) -> Result<(), ApiError> {
        self.delete(&format!("/regulation-fragments/{fragment}/rules"))
            .await
    }

    async fn create_rule(&self, rule: &CreateRule) -> Result<Rule, ApiError> {
        self.post("/rules", rule).await
    }

    async fn update_rule(&self, id: RuleId, update: &UpdateRule) -> Result<Rule, ApiError> {
        self.put(&format!("/rules/{id}"), update).await
    }

    async fn delete_rule(&self, id: RuleId) -> Result<(), ApiError> {
        self.delete(&format!("/rules/{id}")).await
    }
}

#[async_trait]
impl ReasoningApi for HttpBackend {
    async fn run_example(
        &self,
        fragment: FragmentId,
        query: &PrologQuery,
    ) -> Result<PrologResponse, ApiError> {
        self.post(&format!("/regulation-fragments/{fragment}/run-example"), query)
            .await
    }

    async fn generate_examples(&self, fragment: FragmentId) -> Result<ExampleSet, ApiError> {
        let path = format!("/regulation-fragments/{fragment}/generate-examples");
        let response = self.execute(self.client.post(self.url(&path)), &path).await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl ChatApi for HttpBackend {
    async fn chat_messages(&self, regulation: FragmentId) -> Result<Vec<ChatMessage>, ApiError> {
        self.get(&format!("/regulations/{regulation}/chat")).await
    }

    async fn send_chat_message(
        &self,
        regulation: FragmentId,
        message: &CreateChatMessage,
    ) -> Result<ChatMessage, ApiError> {
        self.post(&format!("/regulations/{regulation}/chat"), message)
            .await
    }
}

#[async_trait]
impl AgenticLogApi for HttpBackend {
    async fn agentic_logs(
        &self,
        fragment: FragmentId,
        page: LogPage,
    ) -> Result<Vec<AgenticLog>, ApiError> {
        let path = format!("/regulation-fragments/{fragment}/agentic-logs");

        let mut query: Vec<(&str, String)> = vec![("order-date", page.order.as_str().to_string())];
        if let Some(cursor) = page.cursor {
            query.push(("cursor", cursor.to_string()));
        }
        if let Some(limit) = page.limit {
            query.push(("limit", limit.to_string()));
        }

        let request = self.client.get(self.url(&path)).query(&query);
        let response = self.execute(request, &path).await?;
        Self::decode(response).await
    }
}
