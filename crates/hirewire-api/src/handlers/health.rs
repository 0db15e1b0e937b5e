//! Health Check Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
    /// Text-generation provider in use
    pub llm_provider: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Health check endpoint, served at `/` and `/health`
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let endpoints = BTreeMap::from([
        ("health", "GET /health"),
        ("manager", "POST /manager"),
        ("process", "POST /process"),
        ("registry", "GET /registry"),
        ("specialist", "GET|POST /specialist/:type"),
    ]);

    Json(HealthResponse {
        status: "ok".to_string(),
        message: "HireWire coordinator is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        llm_provider: state.llm_provider().to_string(),
        endpoints,
    })
}

pub async fn not_found() -> ApiError {
    ApiError::EndpointNotFound
}
