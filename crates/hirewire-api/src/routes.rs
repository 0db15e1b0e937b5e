//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::health::health_check))
        .route("/health", get(handlers::health::health_check))
        .route("/manager", post(handlers::jobs::manager))
        .route("/process", post(handlers::jobs::process))
        .route("/registry", get(handlers::specialist::registry))
        .route(
            "/specialist/:type",
            get(handlers::specialist::agent_card).post(handlers::specialist::run_job),
        )
        .fallback(handlers::health::not_found)
}
