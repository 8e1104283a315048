//! End-to-end tests: real router, real state, mock provider.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use hfserve_pipeline::mock::MockProvider;
use hfserve_pipeline::Task;
use hfserve_server::AppState;

fn infer_request(body: &Value) -> Request<Body> {
    Request::builder()
        .uri("/infer")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn repeated_requests_construct_the_pipeline_once() {
    let provider = Arc::new(MockProvider::new());
    let state = Arc::new(AppState::with_provider(provider.clone()));
    let app = hfserve_api::build_test_router(state.clone());

    for i in 0..3 {
        let response = app
            .clone()
            .oneshot(infer_request(&json!({
                "task": "summarization",
                "inputs": format!("article {}", i)
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(provider.load_count(), 1);
    assert_eq!(state.cache().len(), 1);
    assert_eq!(
        provider.loads(),
        vec![(Task::Summarization, "facebook/bart-large-cnn".to_string())]
    );
}

#[tokio::test]
async fn distinct_models_get_distinct_cache_entries() {
    let provider = Arc::new(MockProvider::new());
    let state = Arc::new(AppState::with_provider(provider.clone()));
    let app = hfserve_api::build_test_router(state.clone());

    for model in ["gpt2", "distilgpt2"] {
        let response = app
            .clone()
            .oneshot(infer_request(&json!({
                "task": "text-generation",
                "inputs": "hi",
                "model_id": model
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(provider.load_count(), 2);
    assert_eq!(state.cache().len(), 2);
}

#[tokio::test]
async fn invocation_counter_proves_reuse() {
    let provider = Arc::new(MockProvider::new());
    let state = Arc::new(AppState::with_provider(provider));
    let app = hfserve_api::build_test_router(state);

    let mut last = 0;
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(infer_request(&json!({
                "task": "question-answering",
                "inputs": {"question": "who?", "context": "nobody"}
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        last = body["result"]["invocation"].as_u64().unwrap();
    }

    // Same pipeline instance served both requests
    assert_eq!(last, 2);
}

#[tokio::test]
async fn failed_load_is_retried_on_the_next_request() {
    let provider = Arc::new(MockProvider::new().failing_for("flaky/model"));
    let state = Arc::new(AppState::with_provider(provider.clone()));
    let app = hfserve_api::build_test_router(state.clone());

    let response = app
        .clone()
        .oneshot(infer_request(&json!({
            "task": "token-classification",
            "inputs": "Jane works in Berlin",
            "model_id": "flaky/model"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.cache().is_empty());

    // A different model on the same task is unaffected
    let response = app
        .oneshot(infer_request(&json!({
            "task": "token-classification",
            "inputs": "Jane works in Berlin"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.cache().len(), 1);
}
