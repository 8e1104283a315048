//! Router configuration and setup.

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::post;
use axum::Router;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::ApiConfig, routes, traits::SharedState};

/// Configure routes and middleware.
///
/// Middleware layers are applied before `.with_state()` so the final router
/// is ready for `axum::serve`.
pub fn configure_routes(state: SharedState, config: &ApiConfig) -> Router {
    use crate::route_trait::RegisterableRoute;

    let mut router = Router::new();

    // Trait-based JSON routes
    router = routes::root::RootRoute::register(router);
    router = routes::health::HealthRoute::register(router);
    router = routes::infer::InferRoute::register(router);

    // Multipart upload doesn't fit the JSON route trait; register manually.
    router = router.route("/infer-image", post(routes::infer_image::infer_image));

    if config.enable_swagger {
        router = router.merge(
            SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", routes::ApiDoc::openapi()),
        );
    }

    let router = router
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        );

    // With CORS disabled the router carries no CORS layer at all, so
    // responses gain no access-control headers.
    let router = if config.enable_cors {
        router.layer(cors_layer(config))
    } else {
        router
    };

    router.with_state(state)
}

/// Cross-origin policy from config. A `"*"` entry opens the API to any
/// origin; otherwise only the listed origins are allowed, and entries that
/// fail to parse as header values are skipped with a warning.
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(origins)
}
