//! Service banner endpoint.

use async_trait::async_trait;
use axum::http::Method;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiResult;
use crate::route_trait::{RouteHandler, RouteMetadata};
use crate::traits::AppStateProvider;

/// Root request (empty for GET endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootRequest;

/// Service banner pointing at the available endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub health: String,
    pub infer: String,
    pub infer_image: String,
}

/// Root route handler.
pub struct RootRoute;

#[async_trait]
impl RouteHandler for RootRoute {
    type Request = RootRequest;
    type Response = RootResponse;

    fn metadata() -> RouteMetadata {
        RouteMetadata {
            path: "/",
            method: Method::GET,
            tags: &["System"],
            description: "Service banner listing the available endpoints",
        }
    }

    async fn validate_request(_req: &Self::Request) -> ApiResult<()> {
        Ok(())
    }

    async fn handle(
        _req: Self::Request,
        _state: &dyn AppStateProvider,
    ) -> ApiResult<Self::Response> {
        Ok(RootResponse {
            message: "hfserve - HTTP inference over cached model pipelines".to_string(),
            health: "/health".to_string(),
            infer: "/infer".to_string(),
            infer_image: "/infer-image".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::NoopState;

    #[tokio::test]
    async fn banner_lists_all_endpoints() {
        let response = RootRoute::handle(RootRequest, &NoopState).await.unwrap();
        assert_eq!(response.health, "/health");
        assert_eq!(response.infer, "/infer");
        assert_eq!(response.infer_image, "/infer-image");
    }
}
