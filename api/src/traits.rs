//! Traits for API integration.
//!
//! Routes talk to the backend through [`AppStateProvider`]; the server crate
//! supplies the implementation that owns the pipeline cache.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use hfserve_pipeline::{Parameters, PipelineError, PipelineInput, Task};

/// Result of one inference call: the resolved model id and the raw result
/// passed through from the model provider.
#[derive(Debug, Clone)]
pub struct Inference {
    pub model: String,
    pub result: Value,
}

/// Backend seam the routes call through.
#[async_trait]
pub trait AppStateProvider: Send + Sync {
    /// Resolve the model and construct the cached pipeline for the pair
    /// without invoking it. Lets routes surface model failures before doing
    /// any work on the payload.
    async fn prepare(&self, task: Task, model_id: Option<&str>)
        -> Result<String, PipelineError>;

    /// Run one inference: resolve the model, fetch (or construct) the cached
    /// pipeline, and invoke it under the per-model lock.
    async fn infer(
        &self,
        task: Task,
        model_id: Option<&str>,
        input: PipelineInput,
        parameters: &Parameters,
    ) -> Result<Inference, PipelineError>;
}

/// Concrete state type used by the Axum router.
pub type SharedState = Arc<dyn AppStateProvider>;
