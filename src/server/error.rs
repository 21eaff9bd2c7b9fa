use axum::{
    async_trait,
    body::Bytes,
    extract::{ rejection::BytesRejection, FromRequest, Request },
    http::{ header::CONTENT_TYPE, HeaderMap, StatusCode },
    response::{ IntoResponse, Response },
    Json,
};
use serde_json::error::Category;
use serde::{ de::DeserializeOwned, Serialize };
use thiserror::Error;

/// User-facing message for any review failure; detail goes to the logs only
pub const ENGINE_FAILURE_DETAIL: &str = "Heuristic analysis engine failed.";

/// Error body, shaped `{"detail": ...}` on every failing route
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body could not be decoded into the request type
    #[error("{message}")]
    InvalidBody {
        status: StatusCode,
        message: String,
    },

    #[error("Field '{field}' is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("Heuristic analysis engine failed.")]
    EngineFailure,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::InvalidField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::EngineFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data =>
                ApiError::InvalidBody {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    message: format!("Failed to deserialize the JSON body into the target type: {}", err),
                },
            Category::Syntax | Category::Eof | Category::Io =>
                ApiError::InvalidBody {
                    status: StatusCode::BAD_REQUEST,
                    message: format!("Failed to parse the request body as JSON: {}", err),
                },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse { detail: self.to_string() };
        (self.status(), Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections use the service's `{"detail": ...}` error shape.
///
/// A body without a `Content-Type` header is still decoded as JSON; only an
/// explicit non-JSON content type is refused with 415.
pub struct ValidatedJson<T>(pub T);

fn check_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return Ok(());
    };

    let content_type = value.to_str().unwrap_or_default();
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    if essence == "application/json" || essence.ends_with("+json") {
        return Ok(());
    }

    Err(ApiError::InvalidBody {
        status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
        message: format!(
            "Expected request with `Content-Type: application/json`, got `{}`",
            content_type
        ),
    })
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
    where T: DeserializeOwned, S: Send + Sync
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(req.headers())?;
        let bytes = Bytes::from_request(req, state).await?;
        let value = serde_json::from_slice::<T>(&bytes)?;
        Ok(ValidatedJson(value))
    }
}
