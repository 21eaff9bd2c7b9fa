pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
pub mod server;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::ServerOptions;
pub use errors::{RelayError, RelayResult};
pub use implementations::chat_client::ChatCompletionClient;
pub use implementations::code_relay::LLMCodeRelay;
pub use implementations::config::{ApiConfig, ConfigError, EngineConfig};
pub use models::{
    common::{FailurePolicy, Operation},
    review::{CodeRequest, CodeResponse},
    translation::{TranslateRequest, TranslateResponse},
};
pub use server::{build_router, AppState};
pub use traits::{
    degrade_on_failure,
    raise_on_failure,
    ChatMessage,
    CodeRelay,
    CompletionClient,
    CompletionRequest,
    Degrade,
};
