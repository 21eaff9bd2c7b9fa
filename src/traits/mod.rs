pub mod completion_client;
pub mod code_relay;

// Re-export traits
pub use completion_client::{ChatMessage, CompletionClient, CompletionRequest};
pub use code_relay::{degrade_on_failure, raise_on_failure, CodeRelay, Degrade};
