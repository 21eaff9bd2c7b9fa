use async_trait::async_trait;
use log::{ error, warn };

use crate::errors::{ RelayError, RelayResult };
use crate::models::common::{ FailurePolicy, Operation };
use crate::models::review::{ CodeRequest, CodeResponse };
use crate::models::translation::{ TranslateRequest, TranslateResponse };

/// Turns application requests into model prompts and model replies back into responses
#[async_trait]
pub trait CodeRelay: Send + Sync {
    /// Score the code against the rubric and propose an optimized rewrite
    async fn review(&self, request: &CodeRequest) -> RelayResult<CodeResponse>;

    /// Translate the code into `request.target_language`
    async fn translate(&self, request: &TranslateRequest) -> RelayResult<TranslateResponse>;
}

/// A response that can stand in for a failed operation
pub trait Degrade: Sized {
    fn degraded(error: &RelayError) -> Self;
}

impl Degrade for TranslateResponse {
    fn degraded(error: &RelayError) -> Self {
        TranslateResponse {
            translated_code: format!("// Translation error: {}", error),
        }
    }
}

/// Hand a failed result back to the caller, logging the detail.
///
/// Only for operations whose policy is `Raise`.
pub fn raise_on_failure<T>(operation: Operation, result: RelayResult<T>) -> RelayResult<T> {
    debug_assert_eq!(operation.failure_policy(), FailurePolicy::Raise);
    result.map_err(|err| {
        error!("{} failed: {}", operation, err);
        err
    })
}

/// Swap a failed result for a success-shaped payload carrying the error.
///
/// Only for operations whose policy is `Degrade`.
pub fn degrade_on_failure<T: Degrade>(operation: Operation, result: RelayResult<T>) -> T {
    debug_assert_eq!(operation.failure_policy(), FailurePolicy::Degrade);
    result.unwrap_or_else(|err| {
        warn!("{} failed, answering with degraded payload: {}", operation, err);
        T::degraded(&err)
    })
}
