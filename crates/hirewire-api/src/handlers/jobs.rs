//! Coordinator endpoints
//!
//! `/manager` and `/process` run the same job pipeline; they differ only in
//! the name of the request field. A job that fails inside the pipeline is
//! still a 200 with `status: "failed"`.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use hirewire_types::JobResponse;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManagerRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub request: Option<String>,
}

/// POST /manager `{ "message": ... }`
pub async fn manager(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ManagerRequest>, JsonRejection>,
) -> ApiResult<Json<JobResponse>> {
    let Json(body) = payload?;
    let message = required(body.message, "message")?;
    Ok(Json(run(&state, &message).await))
}

/// POST /process `{ "request": ... }`
pub async fn process(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> ApiResult<Json<JobResponse>> {
    let Json(body) = payload?;
    let request = required(body.request, "request")?;
    Ok(Json(run(&state, &request).await))
}

async fn run(state: &AppState, input: &str) -> JobResponse {
    let outcome = state.coordinator.process_user_request(input).await;

    for attempt in outcome.hiring.attempts() {
        tracing::debug!(
            job_id = %outcome.response.job_id,
            specialist = %attempt.specialist_id,
            tier = %attempt.tier,
            error = %attempt.error,
            "Dispatch attempt failed"
        );
    }

    outcome.response
}

/// A present, non-blank string field
pub(crate) fn required(value: Option<String>, field: &'static str) -> ApiResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ApiError::MissingField(field))
}
