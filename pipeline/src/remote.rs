//! Hosted inference provider.
//!
//! Keeps model loading outside the process: constructing a pipeline
//! validates the model id against the HuggingFace Hub API, and the resulting
//! pipeline forwards every invocation to the hosted inference endpoint for
//! that (task, model) pair. Construction is the expensive, fallible step the
//! cache exists to amortize.

use std::io::Cursor;

use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::provider::{Parameters, Pipeline, PipelineInput, PipelineProvider};
use crate::task::Task;

/// Default HuggingFace Hub API endpoint.
pub const DEFAULT_HUB_BASE: &str = "https://huggingface.co/api";

/// Default hosted inference endpoint.
pub const DEFAULT_INFERENCE_BASE: &str = "https://api-inference.huggingface.co";

/// Configuration for [`RemoteProvider`].
#[derive(Debug, Clone)]
pub struct RemoteProviderConfig {
    /// Base URL of the Hub API used to resolve model ids.
    pub hub_base: String,
    /// Base URL of the inference endpoint invocations are forwarded to.
    pub inference_base: String,
    /// Optional bearer token for gated or rate-limited models.
    pub token: Option<String>,
}

impl Default for RemoteProviderConfig {
    fn default() -> Self {
        Self {
            hub_base: DEFAULT_HUB_BASE.to_string(),
            inference_base: DEFAULT_INFERENCE_BASE.to_string(),
            token: None,
        }
    }
}

/// Subset of the Hub model metadata we care about at load time.
#[derive(Debug, Deserialize)]
struct HubModelInfo {
    #[serde(rename = "modelId")]
    model_id: Option<String>,
    pipeline_tag: Option<String>,
}

/// Pipeline provider backed by hosted inference endpoints.
pub struct RemoteProvider {
    client: reqwest::Client,
    config: RemoteProviderConfig,
}

impl RemoteProvider {
    pub fn new(config: RemoteProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl PipelineProvider for RemoteProvider {
    async fn load(&self, task: Task, model: &str) -> anyhow::Result<Box<dyn Pipeline>> {
        let url = format!("{}/models/{}", self.config.hub_base, model);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .context("failed to reach the model hub")?;

        if !response.status().is_success() {
            bail!(
                "model '{}' could not be resolved on the hub ({})",
                model,
                response.status()
            );
        }

        let info: HubModelInfo = response
            .json()
            .await
            .context("failed to parse hub model metadata")?;

        if let Some(tag) = info.pipeline_tag.as_deref() {
            if tag != task.as_str() {
                tracing::warn!(
                    model = %model,
                    requested = %task,
                    tagged = %tag,
                    "model pipeline tag differs from requested task"
                );
            }
        }

        tracing::debug!(
            model = %info.model_id.as_deref().unwrap_or(model),
            task = %task,
            "resolved model on the hub"
        );

        Ok(Box::new(RemotePipeline {
            client: self.client.clone(),
            url: format!("{}/pipeline/{}/{}", self.config.inference_base, task, model),
            token: self.config.token.clone(),
            model: model.to_string(),
        }))
    }
}

/// A pipeline bound to one hosted inference endpoint URL.
#[derive(Debug)]
struct RemotePipeline {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
    model: String,
}

#[async_trait]
impl Pipeline for RemotePipeline {
    async fn invoke(
        &mut self,
        input: PipelineInput,
        parameters: &Parameters,
    ) -> anyhow::Result<Value> {
        let mut request = match input {
            PipelineInput::Json(inputs) => {
                let mut body = Map::new();
                body.insert("inputs".to_string(), inputs);
                if !parameters.is_empty() {
                    body.insert("parameters".to_string(), Value::Object(parameters.clone()));
                }
                self.client.post(&self.url).json(&Value::Object(body))
            }
            PipelineInput::Image(image) => {
                let mut png = Cursor::new(Vec::new());
                image
                    .write_to(&mut png, image::ImageOutputFormat::Png)
                    .context("failed to encode image for upload")?;
                self.client
                    .post(&self.url)
                    .header(reqwest::header::CONTENT_TYPE, "image/png")
                    .body(png.into_inner())
            }
        };

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("inference request for '{}' failed", self.model))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            bail!("inference endpoint returned {}: {}", status, detail);
        }

        response
            .json()
            .await
            .context("failed to parse inference response")
    }
}
