//! Health check endpoint.

use async_trait::async_trait;
use axum::http::Method;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiResult;
use crate::route_trait::{RouteHandler, RouteMetadata};
use crate::traits::AppStateProvider;

/// Health check request (empty for GET endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRequest;

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version
    pub version: String,
}

/// Health check route handler.
///
/// Returns basic service health information with no authentication required,
/// for load balancer probes and service discovery.
pub struct HealthRoute;

#[async_trait]
impl RouteHandler for HealthRoute {
    type Request = HealthRequest;
    type Response = HealthResponse;

    fn metadata() -> RouteMetadata {
        RouteMetadata {
            path: "/health",
            method: Method::GET,
            tags: &["System"],
            description: "Health check endpoint for service monitoring and load balancer probes",
        }
    }

    async fn validate_request(_req: &Self::Request) -> ApiResult<()> {
        // No parameters to validate.
        Ok(())
    }

    async fn handle(
        _req: Self::Request,
        _state: &dyn AppStateProvider,
    ) -> ApiResult<Self::Response> {
        tracing::debug!("health check request received");

        Ok(HealthResponse {
            status: "ok".to_string(),
            service: "hfserve".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}
