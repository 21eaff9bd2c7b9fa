use axum::{ extract::State, Json };
use chrono::Utc;
use serde::Serialize;

use crate::models::common::Operation;
use crate::models::review::{ CodeRequest, CodeResponse };
use crate::models::translation::{ TranslateRequest, TranslateResponse };
use crate::server::error::{ ApiError, ValidatedJson };
use crate::server::validation::Validate;
use crate::server::AppState;
use crate::traits::code_relay::{ degrade_on_failure, raise_on_failure };

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub model: String,
    pub started_at: String,
    pub uptime_seconds: i64,
}

/// `POST /review`: rubric score plus optimized rewrite
pub async fn review_code(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CodeRequest>
) -> Result<Json<CodeResponse>, ApiError> {
    request.validate(state.max_code_bytes)?;

    let result = state.relay.review(&request).await;
    raise_on_failure(Operation::Review, result)
        .map(Json)
        .map_err(|_| ApiError::EngineFailure)
}

/// `POST /translate`: upstream failures come back inside `translated_code`
pub async fn translate_code(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TranslateRequest>
) -> Result<Json<TranslateResponse>, ApiError> {
    request.validate(state.max_code_bytes)?;

    let result = state.relay.translate(&request).await;
    Ok(Json(degrade_on_failure(Operation::Translate, result)))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.started_at);
    Json(HealthResponse {
        status: "ok",
        service: "coderefine",
        model: state.model.clone(),
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds: uptime.num_seconds(),
    })
}
