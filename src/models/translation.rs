use serde::{ Deserialize, Serialize };

/// Code submitted for translation into another language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub code: String,
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_code: String,
}
