//! Error types for the API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use hfserve_pipeline::{PipelineError, Task};

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types following RFC 7807 Problem Details.
///
/// The service surfaces exactly two classes of failure: every rejected or
/// failed inference is a 400, everything else a 500.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) - malformed request or rejected inference input
    BadRequest(String),

    /// Internal server error (500)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            Self::Internal(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// RFC 7807 Problem Details response.
#[derive(Debug, Serialize, Deserialize)]
struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    type_uri: String,

    /// Short, human-readable summary
    title: String,

    /// HTTP status code
    status: u16,

    /// Human-readable explanation
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, detail) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            Self::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", msg)
            }
        };

        let problem = ProblemDetails {
            type_uri: format!(
                "https://hfserve.dev/errors/{}",
                title.to_lowercase().replace(' ', "-")
            ),
            title: title.to_string(),
            status: status.as_u16(),
            detail,
        };

        (status, Json(problem)).into_response()
    }
}

/// Convert `PipelineError` to `ApiError`.
///
/// This is the PRIMARY error mapping from the pipeline layer. Every pipeline
/// failure is a client-facing 400 with a descriptive message; nothing is
/// retried and there are no partial results.
impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::UnsupportedTask(task) => ApiError::BadRequest(format!(
                "Unsupported task '{}'. Supported: {:?}",
                task,
                Task::supported_names()
            )),
            PipelineError::NoDefaultModel(task) => ApiError::BadRequest(format!(
                "No default model configured for task '{}', please provide model_id.",
                task
            )),
            PipelineError::Load { task, model, reason } => ApiError::BadRequest(format!(
                "Failed to load pipeline for task='{}', model='{}': {}",
                task, model, reason
            )),
            PipelineError::Inference { reason, .. } => {
                ApiError::BadRequest(format!("Inference failed: {}", reason))
            }
        }
    }
}

/// Convert `anyhow::Error` to `ApiError`.
///
/// Fallback for code paths that haven't produced a `PipelineError`.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
