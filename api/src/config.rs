//! API configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Port to bind the HTTP server to.
    ///
    /// Default: 8080
    pub port: u16,

    /// Enable Cross-Origin Resource Sharing (CORS).
    ///
    /// Default: true
    pub enable_cors: bool,

    /// Allowed origins for CORS requests.
    ///
    /// Use `["*"]` to allow all origins (development only).
    ///
    /// Default: `["*"]`
    pub cors_origins: Vec<String>,

    /// Request timeout in seconds.
    ///
    /// Default: 300 (5 minutes)
    pub timeout_secs: u64,

    /// Enable Swagger UI documentation.
    ///
    /// When enabled, API docs are available at `/swagger-ui/`.
    ///
    /// Default: true
    pub enable_swagger: bool,

    /// Maximum accepted request body size in bytes (bounds image uploads).
    ///
    /// Default: 10 MiB
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            timeout_secs: 300,
            enable_swagger: true,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ApiConfig {
    /// Stricter defaults suitable for production:
    /// - CORS restricted to specific origins (must be provided)
    /// - Swagger UI disabled
    pub fn production(allowed_origins: Vec<String>) -> Self {
        Self {
            enable_swagger: false,
            cors_origins: allowed_origins,
            ..Default::default()
        }
    }

    /// Permissive defaults suitable for local development.
    pub fn development() -> Self {
        Self {
            cors_origins: vec!["*".to_string()],
            enable_swagger: true,
            ..Default::default()
        }
    }
}
