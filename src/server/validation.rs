//! Request checks that run after decoding and before the relay is called.

use crate::models::review::CodeRequest;
use crate::models::translation::TranslateRequest;
use crate::server::error::ApiError;

pub trait Validate {
    fn validate(&self, max_code_bytes: usize) -> Result<(), ApiError>;
}

fn check_code_size(code: &str, max_code_bytes: usize) -> Result<(), ApiError> {
    if code.len() > max_code_bytes {
        return Err(ApiError::InvalidField {
            field: "code",
            reason: format!("{} bytes exceeds the {} byte limit", code.len(), max_code_bytes),
        });
    }
    Ok(())
}

impl Validate for CodeRequest {
    fn validate(&self, max_code_bytes: usize) -> Result<(), ApiError> {
        check_code_size(&self.code, max_code_bytes)
    }
}

impl Validate for TranslateRequest {
    fn validate(&self, max_code_bytes: usize) -> Result<(), ApiError> {
        check_code_size(&self.code, max_code_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_code_is_rejected() {
        let request = CodeRequest { code: "x".repeat(11) };
        assert!(request.validate(10).is_err());
        assert!(request.validate(11).is_ok());
    }

    #[test]
    fn translate_checks_code_size_only() {
        let request = TranslateRequest {
            code: "print(1)".to_string(),
            target_language: String::new(),
        };
        assert!(request.validate(1024).is_ok());
        assert!(request.validate(4).is_err());
    }
}
