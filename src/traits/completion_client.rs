use async_trait::async_trait;
use serde::{ Deserialize, Serialize };

use crate::errors::RelayResult;

/// One chat message in OpenAI-compatible form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// A single-shot completion: one system instruction, one user turn
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_content: String,
    /// Ask the service to constrain its output to a JSON object
    pub json_only: bool,
}

/// Access to an external chat-completion service.
///
/// Implementations are shared across concurrent requests and must not
/// mutate state per call. Each call is a single attempt.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the request and return the text of the first choice
    async fn complete(&self, request: &CompletionRequest) -> RelayResult<String>;

    /// Model identifier passed on every call
    fn model(&self) -> &str;
}
