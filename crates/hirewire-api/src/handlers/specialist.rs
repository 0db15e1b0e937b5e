//! Specialist and registry endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use hirewire_agents::SpecialistAgent;
use hirewire_marketplace::SpecialistDirectory;
use hirewire_types::{JobResponse, SkillTag, SpecialistRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::handlers::jobs::required;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobRequest {
    #[serde(default)]
    pub job: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegistryResponse {
    pub specialists: Vec<SpecialistRecord>,
}

/// GET /registry
pub async fn registry(State(state): State<Arc<AppState>>) -> ApiResult<Json<RegistryResponse>> {
    let specialists = state.selector().directory().list_all().await?;
    Ok(Json(RegistryResponse { specialists }))
}

/// GET /specialist/:type - card of the cheapest specialist of that type
pub async fn agent_card(
    State(state): State<Arc<AppState>>,
    Path(specialist_type): Path<String>,
) -> ApiResult<Json<SpecialistRecord>> {
    let record = cheapest(&state, &specialist_type).await?;
    Ok(Json(record))
}

/// POST /specialist/:type `{ "job": ... }`
pub async fn run_job(
    State(state): State<Arc<AppState>>,
    Path(specialist_type): Path<String>,
    payload: Result<Json<JobRequest>, JsonRejection>,
) -> ApiResult<Json<JobResponse>> {
    let Json(body) = payload?;
    let job = required(body.job, "job")?;
    let record = cheapest(&state, &specialist_type).await?;

    let agent = SpecialistAgent::new(record.specialization.clone(), state.coordinator.brain().clone());
    let result = agent.process_job(&record, &job).await?;

    let job_id = format!("job-{}", uuid::Uuid::new_v4());
    Ok(Json(result.normalized(&record).into_response(job_id)))
}

async fn cheapest(state: &AppState, specialist_type: &str) -> ApiResult<SpecialistRecord> {
    let skill = SkillTag::from_tag(specialist_type);
    state
        .selector()
        .find_cheapest(&skill)
        .await?
        .ok_or(ApiError::SpecialistNotFound)
}
