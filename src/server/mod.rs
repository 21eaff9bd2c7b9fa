//! HTTP surface: routes, shared state and error mapping.

pub mod error;
pub mod handlers;
pub mod validation;

use std::sync::Arc;
use axum::{ extract::DefaultBodyLimit, routing::{ get, post }, Router };
use chrono::{ DateTime, Utc };
use tower_http::cors::CorsLayer;

use crate::config::ServerOptions;
use crate::traits::code_relay::CodeRelay;

pub use error::{ ApiError, ErrorResponse, ENGINE_FAILURE_DETAIL };

/// State shared by every handler. Cloned per request; the relay itself is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<dyn CodeRelay>,
    pub model: String,
    pub started_at: DateTime<Utc>,
    pub max_code_bytes: usize,
}

impl AppState {
    pub fn new(relay: Arc<dyn CodeRelay>, model: impl Into<String>, options: &ServerOptions) -> Self {
        Self {
            relay,
            model: model.into(),
            started_at: Utc::now(),
            max_code_bytes: options.max_code_bytes,
        }
    }
}

/// Build the application router.
///
/// CORS is fully open: any origin (mirrored so credentials work), any method, any header.
pub fn build_router(state: AppState, options: &ServerOptions) -> Router {
    Router::new()
        .route("/review", post(handlers::review_code))
        .route("/translate", post(handlers::translate_code))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(options.max_body_bytes))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
