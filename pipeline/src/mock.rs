//! Counting mock provider for tests.
//!
//! Records every load, optionally injects failures or an artificial load
//! delay (to widen first-access races), and returns echo pipelines that
//! report how often they were invoked.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::bail;
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::provider::{Parameters, Pipeline, PipelineInput, PipelineProvider};
use crate::task::Task;

#[derive(Default)]
pub struct MockProvider {
    loads: Mutex<Vec<(Task, String)>>,
    fail_models: HashSet<String>,
    load_delay: Option<Duration>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `load` sleep before returning, so concurrent first accesses
    /// overlap reliably in tests.
    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = Some(delay);
        self
    }

    /// Make `load` fail for the given model id.
    pub fn failing_for(mut self, model: &str) -> Self {
        self.fail_models.insert(model.to_string());
        self
    }

    /// How many pipelines have been constructed so far.
    pub fn load_count(&self) -> usize {
        self.loads.lock().expect("loads lock poisoned").len()
    }

    /// Every (task, model) pair constructed, in order.
    pub fn loads(&self) -> Vec<(Task, String)> {
        self.loads.lock().expect("loads lock poisoned").clone()
    }
}

#[async_trait]
impl PipelineProvider for MockProvider {
    async fn load(&self, task: Task, model: &str) -> anyhow::Result<Box<dyn Pipeline>> {
        if let Some(delay) = self.load_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_models.contains(model) {
            bail!("model '{}' could not be resolved", model);
        }
        self.loads
            .lock()
            .expect("loads lock poisoned")
            .push((task, model.to_string()));
        Ok(Box::new(MockPipeline {
            task,
            model: model.to_string(),
            invocations: AtomicU64::new(0),
        }))
    }
}

#[derive(Debug)]
pub struct MockPipeline {
    task: Task,
    model: String,
    invocations: AtomicU64,
}

#[async_trait]
impl Pipeline for MockPipeline {
    async fn invoke(
        &mut self,
        input: PipelineInput,
        parameters: &Parameters,
    ) -> anyhow::Result<Value> {
        let n = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;
        let echo = match input {
            PipelineInput::Json(value) => value,
            PipelineInput::Image(image) => json!({
                "width": image.width(),
                "height": image.height(),
            }),
        };
        Ok(json!({
            "task": self.task.as_str(),
            "model": self.model,
            "invocation": n,
            "echo": echo,
            "parameters": Value::Object(parameters.clone()),
        }))
    }
}
