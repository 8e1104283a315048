//! Route handler trait system.
//!
//! Every JSON route implements [`RouteHandler`]: it must carry metadata
//! (path, method, description), validate its request before handling, and
//! return [`ApiError`] instead of panicking. Registration is derived, so a
//! route cannot reach the router without going through validation.

use axum::http::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::{ApiError, ApiResult};
use crate::traits::SharedState;

/// Compile-time enforced information about each route.
#[derive(Debug, Clone)]
pub struct RouteMetadata {
    /// HTTP path (e.g., "/infer")
    pub path: &'static str,
    /// HTTP method
    pub method: Method,
    /// OpenAPI tags for grouping
    pub tags: &'static [&'static str],
    /// Description for documentation
    pub description: &'static str,
}

/// Trait implemented by every JSON route.
#[async_trait]
pub trait RouteHandler: Send + Sync + 'static {
    /// Request type. GET routes use a unit struct, which deserializes from
    /// JSON `null`.
    type Request: DeserializeOwned + Debug + Send + Sync;

    /// Response type.
    type Response: Serialize + Debug + Send + Sync;

    /// Route metadata - REQUIRED.
    fn metadata() -> RouteMetadata;

    /// Called BEFORE `handle()`; return `ApiError::BadRequest` for
    /// validation failures.
    async fn validate_request(req: &Self::Request) -> ApiResult<()>;

    /// Handle the request. Must log start, success and failure with a
    /// generated request id, and return `ApiError` for failures.
    async fn handle(
        req: Self::Request,
        state: &dyn crate::traits::AppStateProvider,
    ) -> ApiResult<Self::Response>;
}

/// Route registration trait - adds a validated route to the router.
pub trait RegisterableRoute: RouteHandler {
    fn register(router: axum::Router<SharedState>) -> axum::Router<SharedState> {
        let metadata = Self::metadata();

        match metadata.method {
            Method::GET => {
                let handler = |axum::extract::State(state): axum::extract::State<SharedState>| async move {
                    // GET routes carry no body; unit requests build from null.
                    let req: Self::Request = serde_json::from_value(serde_json::Value::Null)
                        .map_err(|e| ApiError::Internal(format!("empty request build failed: {}", e)))?;
                    Self::validate_request(&req).await?;
                    let response = Self::handle(req, state.as_ref()).await?;
                    Ok::<_, ApiError>(axum::Json(response))
                };
                router.route(metadata.path, axum::routing::get(handler))
            }
            Method::POST => {
                let handler = |axum::extract::State(state): axum::extract::State<SharedState>,
                               axum::Json(req): axum::Json<Self::Request>| async move {
                    Self::validate_request(&req).await?;
                    let response = Self::handle(req, state.as_ref()).await?;
                    Ok::<_, ApiError>(axum::Json(response))
                };
                router.route(metadata.path, axum::routing::post(handler))
            }
            other => panic!("Unsupported HTTP method: {}", other),
        }
    }
}

impl<T: RouteHandler> RegisterableRoute for T {}

/// Reusable validation logic.
pub trait ValidationRule: Send + Sync {
    /// Type being validated
    type Target;

    fn validate(&self, target: &Self::Target) -> ApiResult<()>;
}

/// Common validation rules.
pub mod validators {
    use super::*;

    /// Validates a string is not empty.
    pub struct NotEmpty;

    impl ValidationRule for NotEmpty {
        type Target = String;

        fn validate(&self, target: &Self::Target) -> ApiResult<()> {
            if target.trim().is_empty() {
                Err(ApiError::BadRequest("cannot be empty".into()))
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_empty_rejects_blank_strings() {
        use validators::NotEmpty;

        assert!(NotEmpty.validate(&"text-generation".to_string()).is_ok());
        assert!(NotEmpty.validate(&"".to_string()).is_err());
        assert!(NotEmpty.validate(&"   ".to_string()).is_err());
    }
}
