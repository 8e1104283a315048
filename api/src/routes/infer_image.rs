//! Image inference endpoint.
//!
//! Separate from `/infer` because the input arrives as a multipart file
//! upload rather than JSON. Registered manually in the router: multipart
//! extraction doesn't fit the JSON route trait.

use axum::extract::{Multipart, Query, State};
use axum::Json;
use serde::Deserialize;

use hfserve_pipeline::{Parameters, PipelineInput, Task};

use crate::error::{ApiError, ApiResult};
use crate::routes::infer::InferResponse;
use crate::traits::SharedState;

/// Query parameters for image inference.
#[derive(Debug, Default, Deserialize)]
pub struct InferImageQuery {
    /// Model id; defaults to the image-classification default model.
    pub model_id: Option<String>,
}

/// POST /infer-image: classify an uploaded image.
///
/// Expects a multipart field named `file` containing the image bytes. The
/// image is decoded, converted to RGB, and handed to the cached
/// image-classification pipeline.
pub async fn infer_image(
    State(state): State<SharedState>,
    Query(query): Query<InferImageQuery>,
    mut multipart: Multipart,
) -> ApiResult<Json<InferResponse>> {
    let request_id = uuid::Uuid::new_v4();
    let task = Task::ImageClassification;

    // Resolve the pipeline before touching the upload: an unloadable model
    // is reported even when the payload is also bad.
    state
        .prepare(task, query.model_id.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                model_id = ?query.model_id,
                error = %e,
                "pipeline preparation failed"
            );
            ApiError::from(e)
        })?;

    let mut content: Option<bytes::Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?,
            );
            break;
        }
    }

    let content =
        content.ok_or_else(|| ApiError::BadRequest("Missing multipart field 'file'".into()))?;

    tracing::info!(
        request_id = %request_id,
        model_id = ?query.model_id,
        upload_bytes = content.len(),
        "image inference request received"
    );

    let image = image::load_from_memory(&content)
        .map_err(|e| ApiError::BadRequest(format!("Invalid image: {}", e)))?;
    let image = image::DynamicImage::ImageRgb8(image.to_rgb8());

    let inference = state
        .infer(
            task,
            query.model_id.as_deref(),
            PipelineInput::Image(image),
            &Parameters::new(),
        )
        .await
        .map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                "image inference failed"
            );
            ApiError::from(e)
        })?;

    tracing::info!(
        request_id = %request_id,
        model = %inference.model,
        "image inference successful"
    );

    Ok(Json(InferResponse {
        task: task.to_string(),
        model_id: inference.model,
        result: inference.result,
    }))
}
