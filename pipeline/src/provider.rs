//! Provider seam: the external collaborator that turns a (task, model id)
//! pair into a callable pipeline.
//!
//! Model loading, tokenization and the numeric work of inference all live
//! behind these two traits. The cache and the HTTP layer treat pipelines as
//! black boxes.

use async_trait::async_trait;
use image::DynamicImage;
use serde_json::{Map, Value};

use crate::task::Task;

/// Free-form generation/classification parameters, passed through untouched.
pub type Parameters = Map<String, Value>;

/// Input accepted by a pipeline invocation.
#[derive(Clone)]
pub enum PipelineInput {
    /// Arbitrary JSON payload (string, list of strings, or dict depending on
    /// the task).
    Json(Value),
    /// A decoded RGB image, for vision tasks.
    Image(DynamicImage),
}

/// An opaque callable encapsulating a loaded model.
///
/// Invocations take `&mut self`: callers serialize access per handle via the
/// cache entry's lock, because many inference backends are not thread-safe
/// per instance.
#[async_trait]
pub trait Pipeline: Send + std::fmt::Debug {
    async fn invoke(
        &mut self,
        input: PipelineInput,
        parameters: &Parameters,
    ) -> anyhow::Result<Value>;
}

/// Constructs pipelines. Construction is expected to be expensive and may
/// fail (e.g. unresolvable model id).
#[async_trait]
pub trait PipelineProvider: Send + Sync {
    async fn load(&self, task: Task, model: &str) -> anyhow::Result<Box<dyn Pipeline>>;
}
