//! API error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hirewire_llm::LLMError;
use hirewire_marketplace::MarketplaceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing '{0}' field")]
    MissingField(&'static str),

    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),

    #[error("Specialist not found")]
    SpecialistNotFound,

    #[error("Endpoint not found")]
    EndpointNotFound,

    #[error("{0}")]
    Generation(#[from] LLMError),

    #[error("{0}")]
    Directory(#[from] MarketplaceError),
}

/// Error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::SpecialistNotFound | Self::EndpointNotFound => StatusCode::NOT_FOUND,
            Self::Generation(_) => StatusCode::BAD_GATEWAY,
            Self::Directory(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequestBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(status = %status, error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
