//! Per-process pipeline cache with per-entry locks for safe concurrent use.
//!
//! Double-checked locking: the fast path is a lock-free map read; on a miss
//! a single process-wide lock serializes construction, with a re-check after
//! acquisition so concurrent first access never double-constructs.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::error::{PipelineError, Result};
use crate::provider::{Pipeline, PipelineProvider};
use crate::task::Task;

/// Cache key: a task and its resolved model id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub task: Task,
    pub model: String,
}

/// A cached pipeline plus its per-entry invocation lock.
///
/// Holding the `Mutex` while invoking serializes calls per model but leaves
/// distinct models free to run concurrently.
pub type PipelineHandle = Arc<Mutex<Box<dyn Pipeline>>>;

/// Lazily-populated cache of pipelines, one per (task, model id) pair for
/// the lifetime of the process. Entries are never evicted.
pub struct PipelineCache {
    entries: DashMap<PipelineKey, PipelineHandle>,
    load_lock: Mutex<()>,
    provider: Arc<dyn PipelineProvider>,
}

impl PipelineCache {
    pub fn new(provider: Arc<dyn PipelineProvider>) -> Self {
        Self {
            entries: DashMap::new(),
            load_lock: Mutex::new(()),
            provider,
        }
    }

    /// Resolve an optional model id against the task's default table.
    pub fn resolve_model(task: Task, model_id: Option<&str>) -> Result<String> {
        match model_id {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => task
                .default_model()
                .map(str::to_string)
                .ok_or(PipelineError::NoDefaultModel(task)),
        }
    }

    /// Fetch the pipeline for `(task, model_id)`, constructing it on first
    /// access. Returns the resolved model id alongside the handle.
    ///
    /// Construction happens at most once per key; a failed construction is
    /// not cached, so a later request may retry naturally.
    pub async fn get(
        &self,
        task: Task,
        model_id: Option<&str>,
    ) -> Result<(String, PipelineHandle)> {
        let model = Self::resolve_model(task, model_id)?;
        let key = PipelineKey {
            task,
            model: model.clone(),
        };

        // Fast path: already constructed.
        if let Some(entry) = self.entries.get(&key) {
            return Ok((model, entry.value().clone()));
        }

        // Slow path: serialize construction, then re-check. The provider is
        // awaited while holding the lock so concurrent first access to the
        // same key loads exactly once.
        let _guard = self.load_lock.lock().await;
        if let Some(entry) = self.entries.get(&key) {
            return Ok((model, entry.value().clone()));
        }

        tracing::info!(task = %task, model = %model, "constructing pipeline");
        let pipeline = self
            .provider
            .load(task, &model)
            .await
            .map_err(|e| PipelineError::Load {
                task,
                model: model.clone(),
                reason: e.to_string(),
            })?;

        let handle: PipelineHandle = Arc::new(Mutex::new(pipeline));
        self.entries.insert(key, handle.clone());
        tracing::info!(task = %task, model = %model, cached = self.entries.len(), "pipeline cached");

        Ok((model, handle))
    }

    /// Number of constructed pipelines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a pipeline for the pair has already been constructed.
    pub fn contains(&self, task: Task, model: &str) -> bool {
        self.entries.contains_key(&PipelineKey {
            task,
            model: model.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_explicit_model() {
        let model = PipelineCache::resolve_model(Task::TextGeneration, Some("distilgpt2")).unwrap();
        assert_eq!(model, "distilgpt2");
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let model = PipelineCache::resolve_model(Task::TextGeneration, None).unwrap();
        assert_eq!(model, "gpt2");
    }

    #[test]
    fn resolve_treats_empty_id_as_absent() {
        let model = PipelineCache::resolve_model(Task::Summarization, Some("")).unwrap();
        assert_eq!(model, "facebook/bart-large-cnn");
    }
}
