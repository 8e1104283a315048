//! Generic inference endpoint.
//!
//! Accepts a task name and a free-form JSON payload, resolves the model
//! (default table or explicit `model_id`), and passes inputs and parameters
//! through to the cached pipeline untouched.

use async_trait::async_trait;
use axum::http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use hfserve_pipeline::{Parameters, PipelineInput, Task};

use crate::error::{ApiError, ApiResult};
use crate::route_trait::{validators::NotEmpty, RouteHandler, RouteMetadata, ValidationRule};
use crate::traits::AppStateProvider;

/// Generic inference request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InferRequest {
    /// Pipeline task (e.g. "text-classification", "summarization").
    pub task: String,
    /// Input for the model: string, list of strings, or dict depending on
    /// the task.
    #[schema(value_type = Object)]
    pub inputs: Value,
    /// Model id; defaults to a small, fast model for the task.
    #[serde(default)]
    pub model_id: Option<String>,
    /// Optional generation/classification parameters.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub parameters: Parameters,
}

/// Generic inference response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InferResponse {
    /// Task that ran.
    pub task: String,
    /// Resolved model id.
    pub model_id: String,
    /// Raw result passed through from the model provider.
    #[schema(value_type = Object)]
    pub result: Value,
}

/// Generic inference route handler.
pub struct InferRoute;

#[async_trait]
impl RouteHandler for InferRoute {
    type Request = InferRequest;
    type Response = InferResponse;

    fn metadata() -> RouteMetadata {
        RouteMetadata {
            path: "/infer",
            method: Method::POST,
            tags: &["Inference"],
            description: "Run a task/model pipeline over a JSON payload",
        }
    }

    async fn validate_request(req: &Self::Request) -> ApiResult<()> {
        NotEmpty.validate(&req.task)?;
        if req.inputs.is_null() {
            return Err(ApiError::BadRequest("inputs cannot be null".into()));
        }
        Ok(())
    }

    async fn handle(req: Self::Request, state: &dyn AppStateProvider) -> ApiResult<Self::Response> {
        let request_id = uuid::Uuid::new_v4();

        // Unknown task strings become the descriptive invalid-input error
        // here, before any construction is attempted.
        let task: Task = req.task.parse().map_err(ApiError::from)?;

        tracing::info!(
            request_id = %request_id,
            task = %task,
            model_id = ?req.model_id,
            "inference request received"
        );

        let inference = state
            .infer(
                task,
                req.model_id.as_deref(),
                PipelineInput::Json(req.inputs),
                &req.parameters,
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    request_id = %request_id,
                    task = %task,
                    error = %e,
                    "inference failed"
                );
                ApiError::from(e)
            })?;

        tracing::info!(
            request_id = %request_id,
            task = %task,
            model = %inference.model,
            "inference successful"
        );

        Ok(InferResponse {
            task: task.to_string(),
            model_id: inference.model,
            result: inference.result,
        })
    }
}
