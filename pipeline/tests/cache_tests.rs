//! Integration tests for the pipeline cache.
//!
//! These exercise the real cache against the counting mock provider: the
//! construct-once invariant, concurrent first access, and model resolution.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use hfserve_pipeline::mock::MockProvider;
use hfserve_pipeline::{PipelineCache, PipelineError, PipelineInput, Task};

#[tokio::test]
async fn same_pair_yields_same_handle() {
    let provider = Arc::new(MockProvider::new());
    let cache = PipelineCache::new(provider.clone());

    let (model_a, first) = cache.get(Task::TextGeneration, None).await.unwrap();
    let (model_b, second) = cache.get(Task::TextGeneration, None).await.unwrap();

    assert_eq!(model_a, "gpt2");
    assert_eq!(model_b, "gpt2");
    assert!(Arc::ptr_eq(&first, &second), "expected the cached handle");
    assert_eq!(provider.load_count(), 1, "construction must happen once");
}

#[tokio::test]
async fn distinct_models_construct_independently() {
    let provider = Arc::new(MockProvider::new());
    let cache = PipelineCache::new(provider.clone());

    let (_, gpt2) = cache.get(Task::TextGeneration, None).await.unwrap();
    let (_, distil) = cache
        .get(Task::TextGeneration, Some("distilgpt2"))
        .await
        .unwrap();

    assert!(!Arc::ptr_eq(&gpt2, &distil));
    assert_eq!(provider.load_count(), 2);
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn concurrent_first_access_constructs_once() {
    let provider = Arc::new(MockProvider::new().with_load_delay(Duration::from_millis(50)));
    let cache = Arc::new(PipelineCache::new(provider.clone()));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            cache.get(Task::Summarization, None).await
        }));
    }

    let mut pipelines = Vec::new();
    for handle in handles {
        let (model, pipeline) = handle.await.unwrap().unwrap();
        assert_eq!(model, "facebook/bart-large-cnn");
        pipelines.push(pipeline);
    }

    assert_eq!(provider.load_count(), 1, "concurrent first access double-constructed");
    for pipeline in &pipelines[1..] {
        assert!(Arc::ptr_eq(&pipelines[0], pipeline));
    }
}

#[tokio::test]
async fn load_failure_is_not_cached() {
    let provider = Arc::new(MockProvider::new().failing_for("no/such-model"));
    let cache = PipelineCache::new(provider.clone());

    let err = cache
        .get(Task::TextClassification, Some("no/such-model"))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Load { ref model, .. } if model == "no/such-model"));
    assert!(cache.is_empty(), "failed constructions must not be cached");
    assert!(!cache.contains(Task::TextClassification, "no/such-model"));

    // A working model still loads afterwards.
    cache.get(Task::TextClassification, None).await.unwrap();
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn invocation_goes_through_the_entry_lock() {
    let provider = Arc::new(MockProvider::new());
    let cache = PipelineCache::new(provider);

    let (model, handle) = cache.get(Task::FillMask, None).await.unwrap();
    let mut pipeline = handle.lock().await;
    let result = pipeline
        .invoke(
            PipelineInput::Json(json!("Paris is the <mask> of France.")),
            &serde_json::Map::new(),
        )
        .await
        .unwrap();

    assert_eq!(result["task"], "fill-mask");
    assert_eq!(result["model"], model);
    assert_eq!(result["invocation"], 1);
}
