//! HireWire HTTP API
//!
//! # API Structure
//!
//! ```text
//! /                     - Service status
//! /health               - Service status
//! /manager              - POST { message } -> job response
//! /process              - POST { request } -> job response
//! /registry             - GET every listed specialist
//! /specialist/:type     - GET agent card, POST { job } -> specialist result
//! ```
//!
//! Every error body is `{ "error": "<message>" }`.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderName;
use axum::Router;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Enable CORS for browser clients
    pub enable_cors: bool,
    /// Allowed origins for CORS
    pub cors_origins: Vec<String>,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            enable_tracing: true,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Create the main API router with all middleware
pub fn create_router(state: Arc<AppState>, config: ApiConfig) -> Router {
    let mut router = routes::routes()
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .with_state(state);

    // Add tracing
    if config.enable_tracing {
        router = router.layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            },
        ));
    }

    // Request IDs wrap the trace layer so spans see the generated id
    let x_request_id = HeaderName::from_static("x-request-id");
    router = router
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    // Add CORS
    if config.enable_cors {
        let cors = if config.cors_origins.iter().any(|o| o == "*") {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(
                    config
                        .cors_origins
                        .iter()
                        .filter_map(|o| o.parse().ok())
                        .collect::<Vec<_>>(),
                )
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any)
        };
        router = router.layer(cors);
    }

    router
}

/// Create a minimal router for testing
pub fn create_test_router(state: Arc<AppState>) -> Router {
    routes::routes().with_state(state)
}
