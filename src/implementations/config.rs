use serde::{ Deserialize, Serialize };
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::ServerOptions;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

pub const REVIEW_TEMPLATE: &str = "review";
pub const TRANSLATE_TEMPLATE: &str = "translate";
pub const TARGET_LANGUAGE_PLACEHOLDER: &str = "{{target_language}}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0} is not set")]
    MissingApiKey(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// API key for the completion service; normally left empty and read from the environment
    pub api_key: Option<String>,

    /// Chat-completions endpoint
    pub api_endpoint: String,

    /// Model identifier sent on every call
    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub server: ServerOptions,

    /// Configuration for the completion service
    pub llm_api: ApiConfig,

    /// Sampling temperature (0.0-1.0), kept low for repeatable verdicts
    pub temperature: f32,

    /// Upstream request timeout; `None` leaves the transport default in place
    pub timeout_secs: Option<u64>,

    /// System prompts keyed by operation
    pub prompt_templates: HashMap<String, String>,
}

impl EngineConfig {
    /// Load configuration from a YAML file. Keys absent from the file keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config: EngineConfig = serde_yaml::from_str(&contents)?;

        // A file may override one template without dropping the other
        for (name, template) in default_prompt_templates() {
            config.prompt_templates.entry(name).or_insert(template);
        }

        config.validate()?;
        Ok(config)
    }

    /// Resolve the API key: explicit config value first, then the configured environment variable.
    pub fn get_api_key(&self) -> Result<String, ConfigError> {
        use log::debug;

        if let Some(api_key) = self.llm_api.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            debug!("Using API key from config");
            return Ok(api_key.clone());
        }

        match std::env::var(&self.llm_api.api_key_env) {
            Ok(key) if !key.trim().is_empty() => {
                debug!("Using API key from {}", self.llm_api.api_key_env);
                Ok(key)
            }
            _ => Err(ConfigError::MissingApiKey(self.llm_api.api_key_env.clone())),
        }
    }

    /// Get the template for a specific operation
    pub fn get_template(&self, template_name: &str) -> Option<String> {
        self.prompt_templates.get(template_name).cloned()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(
                ConfigError::Invalid(format!("temperature {} is outside 0.0-2.0", self.temperature))
            );
        }
        if self.llm_api.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm_api.model must not be empty".to_string()));
        }
        if self.server.max_code_bytes > self.server.max_body_bytes {
            return Err(
                ConfigError::Invalid(
                    "server.max_code_bytes cannot exceed server.max_body_bytes".to_string()
                )
            );
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid("timeout_secs must be positive".to_string()));
        }
        match self.get_template(TRANSLATE_TEMPLATE) {
            Some(template) if template.contains(TARGET_LANGUAGE_PLACEHOLDER) => {}
            _ => {
                return Err(
                    ConfigError::Invalid(
                        format!(
                            "prompt_templates.{} must contain {}",
                            TRANSLATE_TEMPLATE,
                            TARGET_LANGUAGE_PLACEHOLDER
                        )
                    )
                );
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            server: ServerOptions::default(),
            llm_api: ApiConfig::default(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: None,
            prompt_templates: default_prompt_templates(),
        }
    }
}

fn default_prompt_templates() -> HashMap<String, String> {
    let mut prompt_templates = HashMap::new();
    prompt_templates.insert(
        REVIEW_TEMPLATE.to_string(),
        r#"You are a strict Senior Software Architect. Analyze code using this exact 100-point rubric:
1. Logic & Correctness (30 pts): Does it work? Are there edge-case bugs?
2. Time/Space Efficiency (25 pts): Is the algorithm optimal (Big O)?
3. Security & Safety (15 pts): Are there vulnerabilities or crash risks?
4. Readability & Standards (15 pts): Variable naming, clean code patterns?
5. Maintainability (15 pts): Is the architecture scalable?

STRICT RULES:
- Calculate the 'original_score' by summing the points above for the USER'S code.
- Calculate the 'refined_score' for YOUR optimized version (this should be 95-100).
- If the user's code is already optimal, 'original_score' must be 100.
- 'optimized_code' must be a single string. Use '\n' for new lines and escape all quotes.
- Return ONLY a valid JSON object. No markdown, no triple quotes.

JSON Schema:
{
    "original_score": int,
    "refined_score": int,
    "bugs": "string",
    "performance": "string",
    "improvements": ["list"],
    "optimized_code": "string",
    "explanation": "string",
    "time_complexity": "string",
    "space_complexity": "string"
}"#.to_string(),
    );
    prompt_templates.insert(
        TRANSLATE_TEMPLATE.to_string(),
        r#"You are a polyglot expert. Translate this code to {{target_language}}.
Rules: Return ONLY JSON: {"translated_code": "string"}. Use '\n' and escape double quotes. No markdown tags."#.to_string(),
    );
    prompt_templates
}
