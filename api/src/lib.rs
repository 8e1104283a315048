//! hfserve API crate
//!
//! Self-contained HTTP API layer using Axum.
//!
//! # Architecture
//!
//! Routes translate HTTP input into one call on [`AppStateProvider`]; the
//! server crate supplies the implementation backed by the pipeline cache.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hfserve_api::{AppStateProvider, Inference};
//! use hfserve_pipeline::{Parameters, PipelineError, PipelineInput, Task};
//!
//! struct MyState;
//!
//! #[async_trait::async_trait]
//! impl AppStateProvider for MyState {
//!     async fn prepare(
//!         &self,
//!         _task: Task,
//!         _model_id: Option<&str>,
//!     ) -> Result<String, PipelineError> {
//!         Ok("noop".into())
//!     }
//!
//!     async fn infer(
//!         &self,
//!         _task: Task,
//!         _model_id: Option<&str>,
//!         _input: PipelineInput,
//!         _parameters: &Parameters,
//!     ) -> Result<Inference, PipelineError> {
//!         Ok(Inference { model: "noop".into(), result: serde_json::Value::Null })
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     hfserve_api::run_server(Arc::new(MyState), 8080).await
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod config;
mod error;
mod router;
mod routes;
pub mod route_trait;
mod traits;

// Re-export public API
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::infer::{InferRequest, InferResponse};
pub use traits::{AppStateProvider, Inference, SharedState};

use std::net::SocketAddr;

/// Run the HTTP API server on the given port with default configuration.
///
/// # Errors
///
/// Returns an error if the port is already in use or the server encounters
/// a fatal error.
pub async fn run_server(state: SharedState, port: u16) -> anyhow::Result<()> {
    run_server_with_config(
        state,
        ApiConfig {
            port,
            ..Default::default()
        },
    )
    .await
}

/// Run the HTTP API server with custom configuration.
pub async fn run_server_with_config(state: SharedState, config: ApiConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("hfserve API listening on http://{}", addr);
    if config.enable_swagger {
        tracing::info!("Swagger UI:   http://{}/swagger-ui/", addr);
        tracing::info!("OpenAPI spec: http://{}/api-doc/openapi.json", addr);
    }

    let app = router::configure_routes(state, &config);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Build a router for in-process testing (no swagger, default limits).
#[cfg(any(test, feature = "test-helpers"))]
pub fn build_test_router(state: SharedState) -> axum::Router {
    let config = ApiConfig {
        enable_swagger: false,
        ..Default::default()
    };
    router::configure_routes(state, &config)
}
