//! API route handlers.

pub mod health;
pub mod infer;
pub mod infer_image;
pub mod root;

use utoipa::OpenApi;

/// OpenAPI documentation for all routes.
///
/// NOTE: JSON routes are trait-based; path generation from `RouteMetadata`
/// will be added in a future iteration. Schemas are exported so clients can
/// generate types today.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "hfserve API",
        version = "0.1.0",
        description = "Stateless HTTP inference over cached, pre-trained model pipelines",
        license(name = "MIT")
    ),
    paths(),
    components(schemas(
        health::HealthResponse,
        root::RootResponse,
        infer::InferRequest,
        infer::InferResponse,
    ))
)]
pub struct ApiDoc;
