pub mod common;
pub mod review;
pub mod translation;

// Re-export common model types
pub use common::{FailurePolicy, Operation};
pub use review::{CodeRequest, CodeResponse};
pub use translation::{TranslateRequest, TranslateResponse};
