use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use log::{ debug, info, warn };
use serde_json::{ Map, Value };

use crate::errors::{ RelayError, RelayResult };
use crate::implementations::config::{ EngineConfig, REVIEW_TEMPLATE, TRANSLATE_TEMPLATE };
use crate::models::review::{ CodeRequest, CodeResponse };
use crate::models::translation::{ TranslateRequest, TranslateResponse };
use crate::traits::code_relay::CodeRelay;
use crate::traits::completion_client::{ CompletionClient, CompletionRequest };

const MIN_SCORE: i64 = 0;
const MAX_SCORE: i64 = 100;

/// Relay that asks an LLM to review or translate code and checks the reply against
/// the response contract.
///
/// # Usage Example
/// ```rust,no_run
/// use std::sync::Arc;
/// use coderefine::{ ChatCompletionClient, CodeRelay, CodeRequest, EngineConfig, LLMCodeRelay };
///
/// async fn review_example() -> Result<(), Box<dyn std::error::Error>> {
///     let config = EngineConfig::default();
///     let client = ChatCompletionClient::new(&config, config.get_api_key()?)?;
///     let relay = LLMCodeRelay::new(Arc::new(client), &config);
///
///     let verdict = relay.review(&CodeRequest { code: "def f(x): return x+1".to_string() }).await?;
///     println!("{} -> {}", verdict.original_score, verdict.refined_score);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LLMCodeRelay {
    client: Arc<dyn CompletionClient>,
    prompt_templates: HashMap<String, String>,
}

impl LLMCodeRelay {
    pub fn new(client: Arc<dyn CompletionClient>, config: &EngineConfig) -> Self {
        Self {
            client,
            prompt_templates: config.prompt_templates.clone(),
        }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Render a template with the given parameters
    fn render_template(
        &self,
        template_name: &str,
        params: &HashMap<String, String>
    ) -> RelayResult<String> {
        let template = self.prompt_templates
            .get(template_name)
            .ok_or_else(||
                RelayError::TemplateError(format!("Template not found: {}", template_name))
            )?;

        let mut result = template.clone();
        for (key, value) in params {
            let placeholder = format!("{{{{{}}}}}", key);
            result = result.replace(&placeholder, value);
        }

        Ok(result)
    }

    /// Parse the model's text as a JSON object
    fn parse_reply(content: &str) -> RelayResult<Map<String, Value>> {
        let value: Value = serde_json
            ::from_str(content.trim())
            .map_err(|e| RelayError::ParseError(format!("Reply is not valid JSON: {}", e)))?;

        match value {
            Value::Object(map) => Ok(map),
            other =>
                Err(
                    RelayError::ParseError(
                        format!("Reply is a JSON {} rather than an object", json_kind(&other))
                    )
                ),
        }
    }
}

#[async_trait]
impl CodeRelay for LLMCodeRelay {
    async fn review(&self, request: &CodeRequest) -> RelayResult<CodeResponse> {
        let system_prompt = self.render_template(REVIEW_TEMPLATE, &HashMap::new())?;
        let completion = CompletionRequest {
            system_prompt,
            user_content: format!("Perform a rubric-based review of this code:\n\n{}", request.code),
            json_only: true,
        };

        info!("Requesting rubric review ({} bytes of code)", request.code.len());
        let content = self.client.complete(&completion).await?;
        debug!("Review reply length: {} characters", content.len());

        let reply = Self::parse_reply(&content)?;
        let verdict = review_from_reply(&reply)?;

        info!(
            "Review scored {} -> {}",
            verdict.original_score,
            verdict.refined_score
        );
        Ok(verdict)
    }

    async fn translate(&self, request: &TranslateRequest) -> RelayResult<TranslateResponse> {
        let target_language = request.target_language.trim().to_string();
        let mut params = HashMap::new();
        params.insert("target_language".to_string(), target_language.clone());

        let system_prompt = self.render_template(TRANSLATE_TEMPLATE, &params)?;
        let completion = CompletionRequest {
            system_prompt,
            user_content: request.code.clone(),
            json_only: true,
        };

        info!("Requesting translation to {} ({} bytes of code)", target_language, request.code.len());
        let content = self.client.complete(&completion).await?;

        let reply = Self::parse_reply(&content)?;
        translation_from_reply(&reply)
    }
}

/// Validate a review reply field by field, coercing the two scores.
pub(crate) fn review_from_reply(reply: &Map<String, Value>) -> RelayResult<CodeResponse> {
    Ok(CodeResponse {
        original_score: coerce_score(reply, "original_score")?,
        refined_score: coerce_score(reply, "refined_score")?,
        bugs: string_field(reply, "bugs")?,
        performance: string_field(reply, "performance")?,
        improvements: string_list_field(reply, "improvements")?,
        optimized_code: string_field(reply, "optimized_code")?,
        explanation: string_field(reply, "explanation")?,
        time_complexity: string_field(reply, "time_complexity")?,
        space_complexity: string_field(reply, "space_complexity")?,
    })
}

pub(crate) fn translation_from_reply(reply: &Map<String, Value>) -> RelayResult<TranslateResponse> {
    match reply.get("translated_code") {
        Some(Value::String(code)) if !code.trim().is_empty() => {
            Ok(TranslateResponse { translated_code: code.clone() })
        }
        Some(Value::String(_)) => Err(RelayError::schema("translated_code", "is empty")),
        None | Some(Value::Null) => Err(RelayError::schema("translated_code", "is missing")),
        Some(other) =>
            Err(
                RelayError::schema(
                    "translated_code",
                    format!("expected a string, got {}", json_kind(other))
                )
            ),
    }
}

/// Coerce a score to an integer in 0..=100. Absent scores count as 0.
fn coerce_score(reply: &Map<String, Value>, field: &str) -> RelayResult<u8> {
    let raw = match reply.get(field) {
        None | Some(Value::Null) => {
            warn!("Model reply omitted '{}', defaulting to 0", field);
            return Ok(0);
        }
        Some(Value::Number(number)) =>
            number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f.trunc() as i64))
                .ok_or_else(|| RelayError::schema(field, format!("{} is not representable", number)))?,
        Some(Value::String(text)) => parse_numeric(text).ok_or_else(||
            RelayError::schema(field, format!("'{}' is not a number", text))
        )?,
        Some(other) => {
            return Err(
                RelayError::schema(field, format!("expected an integer, got {}", json_kind(other)))
            );
        }
    };

    let clamped = raw.clamp(MIN_SCORE, MAX_SCORE);
    if clamped != raw {
        warn!("Model reply '{}' = {} is out of range, clamped to {}", field, raw, clamped);
    }
    Ok(clamped as u8)
}

fn parse_numeric(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>()
        .ok()
        .or_else(||
            text
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        )
}

fn string_field(reply: &Map<String, Value>, field: &str) -> RelayResult<String> {
    match reply.get(field) {
        Some(Value::String(text)) => Ok(text.clone()),
        None | Some(Value::Null) => {
            warn!("Model reply omitted '{}'", field);
            Ok(String::new())
        }
        Some(other) =>
            Err(RelayError::schema(field, format!("expected a string, got {}", json_kind(other)))),
    }
}

fn string_list_field(reply: &Map<String, Value>, field: &str) -> RelayResult<Vec<String>> {
    match reply.get(field) {
        Some(Value::Array(items)) =>
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    item
                        .as_str()
                        .map(|s| s.to_string())
                        .ok_or_else(||
                            RelayError::schema(
                                &format!("{}[{}]", field, i),
                                format!("expected a string, got {}", json_kind(item))
                            )
                        )
                })
                .collect(),
        // Models sometimes collapse a one-item list into a bare string
        Some(Value::String(text)) => Ok(vec![text.clone()]),
        None | Some(Value::Null) => {
            warn!("Model reply omitted '{}'", field);
            Ok(Vec::new())
        }
        Some(other) =>
            Err(RelayError::schema(field, format!("expected a list, got {}", json_kind(other)))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
