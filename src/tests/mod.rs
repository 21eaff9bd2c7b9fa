pub mod config_tests;

use std::sync::{ Arc, Mutex };
use async_trait::async_trait;

use crate::errors::{ RelayError, RelayResult };
use crate::implementations::code_relay::LLMCodeRelay;
use crate::implementations::config::EngineConfig;
use crate::traits::completion_client::{ CompletionClient, CompletionRequest };

/// Completion client double that answers every call with the same scripted outcome
pub struct ScriptedClient {
    reply: Result<String, String>,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl ScriptedClient {
    pub fn replying(content: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(content.to_string()), last_request: Mutex::new(None) })
    }

    /// Every call fails as if the network were down
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self { reply: Err(message.to_string()), last_request: Mutex::new(None) })
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: &CompletionRequest) -> RelayResult<String> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.reply.clone().map_err(RelayError::NetworkError)
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}

pub fn relay_with(client: Arc<ScriptedClient>) -> LLMCodeRelay {
    LLMCodeRelay::new(client, &EngineConfig::default())
}

/// Initialize logging once; later calls are no-ops
pub fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub const FULL_REVIEW_REPLY: &str = r#"{
    "original_score": 62,
    "refined_score": 97,
    "bugs": "No handling for non-numeric input.",
    "performance": "Constant time.",
    "improvements": ["Add type hints", "Validate input"],
    "optimized_code": "def f(x: int) -> int:\n    return x + 1",
    "explanation": "Adds typing and validation.",
    "time_complexity": "O(1)",
    "space_complexity": "O(1)"
}"#;
