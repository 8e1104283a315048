//! Shared application state.
//!
//! One [`AppState`] per process, holding the pipeline cache. Routes reach it
//! through the [`AppStateProvider`] trait, so tests can swap the provider
//! without touching HTTP code.

use std::sync::Arc;

use async_trait::async_trait;

use hfserve_api::{AppStateProvider, Inference};
use hfserve_pipeline::{
    Parameters, PipelineCache, PipelineError, PipelineInput, PipelineProvider, RemoteProvider,
    RemoteProviderConfig, Task,
};

/// Process-wide state: the pipeline cache over a provider.
pub struct AppState {
    cache: PipelineCache,
}

impl AppState {
    /// State backed by the hosted inference provider.
    pub fn new(config: RemoteProviderConfig) -> Self {
        Self::with_provider(Arc::new(RemoteProvider::new(config)))
    }

    /// State over an arbitrary provider. Used by tests with the mock.
    pub fn with_provider(provider: Arc<dyn PipelineProvider>) -> Self {
        Self {
            cache: PipelineCache::new(provider),
        }
    }

    /// The underlying cache, for introspection.
    pub fn cache(&self) -> &PipelineCache {
        &self.cache
    }
}

#[async_trait]
impl AppStateProvider for AppState {
    async fn prepare(
        &self,
        task: Task,
        model_id: Option<&str>,
    ) -> Result<String, PipelineError> {
        let (model, _handle) = self.cache.get(task, model_id).await?;
        Ok(model)
    }

    async fn infer(
        &self,
        task: Task,
        model_id: Option<&str>,
        input: PipelineInput,
        parameters: &Parameters,
    ) -> Result<Inference, PipelineError> {
        let (model, handle) = self.cache.get(task, model_id).await?;

        tracing::debug!(task = %task, model = %model, "dispatching to cached pipeline");

        // One invocation at a time per pipeline; concurrent requests for the
        // same model queue here.
        let mut pipeline = handle.lock().await;
        let result = pipeline
            .invoke(input, parameters)
            .await
            .map_err(|e| PipelineError::Inference {
                model: model.clone(),
                reason: e.to_string(),
            })?;

        Ok(Inference { model, result })
    }
}
