use serde::{ Deserialize, Serialize };

/// Code submitted for a rubric review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeRequest {
    pub code: String,
}

/// Rubric verdict returned by `/review`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeResponse {
    pub original_score: u8,
    pub refined_score: u8,
    pub bugs: String,
    pub performance: String,
    pub improvements: Vec<String>,
    pub optimized_code: String,
    pub explanation: String,
    pub time_complexity: String,
    pub space_complexity: String,
}
