use std::time::{ Duration, Instant };
use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::Serialize;

use crate::errors::{ RelayError, RelayResult };
use crate::implementations::config::{ ConfigError, EngineConfig };
use crate::traits::completion_client::{ ChatMessage, CompletionClient, CompletionRequest };

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// Client for an OpenAI-compatible chat-completions endpoint (Groq by default).
///
/// Built once at startup and shared by every request. The underlying
/// `reqwest::Client` pools connections and is safe to use concurrently.
/// No retries are attempted: a failed call is reported to the caller as is.
#[derive(Clone)]
pub struct ChatCompletionClient {
    http_client: reqwest::Client,
    api_endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl ChatCompletionClient {
    /// Create a client from the engine configuration and a resolved API key
    pub fn new(config: &EngineConfig, api_key: String) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| ConfigError::Invalid(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_endpoint: config.llm_api.api_endpoint.clone(),
            api_key,
            model: config.llm_api.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.api_endpoint
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> RelayResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage::system(request.system_prompt.clone()),
                ChatMessage::user(request.user_content.clone())
            ],
            temperature: self.temperature,
            response_format: if request.json_only {
                Some(ResponseFormat { kind: "json_object" })
            } else {
                None
            },
        };

        debug!("API endpoint: {}", self.api_endpoint);
        debug!("Model: {}", self.model);
        debug!("Temperature: {}", self.temperature);
        debug!("User content length: {} characters", request.user_content.len());

        let started = Instant::now();
        let response = self.http_client
            .post(&self.api_endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send().await
            .map_err(|e| {
                let error_msg = format!("Network error when calling completion API: {}", e);
                warn!("{}", error_msg);
                if e.is_timeout() {
                    warn!("Request timed out");
                }
                if e.is_connect() {
                    warn!("Connection error - check network connectivity");
                }
                RelayError::NetworkError(error_msg)
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, error_text);
            return Err(RelayError::HttpError {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            warn!("Failed to get text from response: {}", e);
            RelayError::ParseError(e.to_string())
        })?;

        info!(
            "Completion received from {} in {} ms",
            self.model,
            started.elapsed().as_millis()
        );

        extract_content(&response_text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Pull `choices[0].message.content` out of a chat-completions reply
fn extract_content(response_text: &str) -> RelayResult<String> {
    let response_json: serde_json::Value = serde_json
        ::from_str(response_text)
        .map_err(|e| RelayError::ParseError(format!("Invalid JSON response: {}", e)))?;

    let choices = response_json["choices"]
        .as_array()
        .ok_or_else(|| RelayError::ApiError("Response has no choices array".to_string()))?;

    let first = choices
        .first()
        .ok_or_else(|| RelayError::ApiError("No response from API".to_string()))?;

    first["message"]["content"]
        .as_str()
        .map(|text| text.to_string())
        .ok_or_else(|| RelayError::ApiError("First choice carries no message content".to_string()))
}
