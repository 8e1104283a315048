//! Configuration system for the inference server.
//!
//! Sources, highest priority first:
//! - CLI arguments
//! - Environment variables (via clap `env` fallbacks, plus `HF_TOKEN`)
//! - TOML config file
//! - Defaults

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use hfserve_api::ApiConfig;
use hfserve_pipeline::RemoteProviderConfig;

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "hfserve")]
#[command(about = "HTTP inference server exposing cached model pipelines")]
#[command(version)]
pub struct CliArgs {
    /// HTTP port for the API server
    #[arg(long, short = 'p', default_value = "8080", env = "HFSERVE_PORT")]
    pub port: u16,

    /// Configuration file path
    #[arg(long, short = 'c', default_value = "hfserve.toml", env = "HFSERVE_CONFIG")]
    pub config: PathBuf,

    /// Model hub API base URL (model resolution)
    #[arg(long, env = "HFSERVE_HUB_BASE")]
    pub hub_base: Option<String>,

    /// Hosted inference base URL (pipeline invocation)
    #[arg(long, env = "HFSERVE_INFERENCE_BASE")]
    pub inference_base: Option<String>,

    /// Access token for gated models (usually set via HF_TOKEN)
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log filter, e.g. "hfserve=debug,tower_http=info"
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,
}

/// Full server configuration (merged from all sources).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API settings
    pub http: HttpConfig,
    /// Model hub / inference backend settings
    pub hub: HubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub max_body_size: usize,
    pub timeout_secs: u64,
    pub enable_swagger: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    pub hub_base: String,
    pub inference_base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Partial config as read from a TOML file; absent fields keep defaults.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    http: FileHttpConfig,
    #[serde(default)]
    hub: FileHubConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FileHttpConfig {
    port: Option<u16>,
    cors_origins: Option<Vec<String>>,
    max_body_size: Option<usize>,
    timeout_secs: Option<u64>,
    enable_swagger: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FileHubConfig {
    hub_base: Option<String>,
    inference_base: Option<String>,
    token: Option<String>,
}

impl ServerConfig {
    /// Load configuration from CLI args and optional config file.
    ///
    /// Priority: CLI args > Environment > Config file > Defaults
    pub fn load(args: &CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if args.config.exists() {
            let file_config = FileConfig::from_file(&args.config)
                .with_context(|| format!("Failed to load config from {:?}", args.config))?;
            config.apply_file(file_config);
        }

        // CLI args (and their env fallbacks) win
        config.http.port = args.port;
        if let Some(ref hub_base) = args.hub_base {
            config.hub.hub_base = hub_base.clone();
        }
        if let Some(ref inference_base) = args.inference_base {
            config.hub.inference_base = inference_base.clone();
        }
        if let Some(ref token) = args.token {
            config.hub.token = Some(token.clone());
        }

        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(port) = file.http.port {
            self.http.port = port;
        }
        if let Some(origins) = file.http.cors_origins {
            self.http.cors_origins = origins;
        }
        if let Some(max_body_size) = file.http.max_body_size {
            self.http.max_body_size = max_body_size;
        }
        if let Some(timeout_secs) = file.http.timeout_secs {
            self.http.timeout_secs = timeout_secs;
        }
        if let Some(enable_swagger) = file.http.enable_swagger {
            self.http.enable_swagger = enable_swagger;
        }
        if let Some(hub_base) = file.hub.hub_base {
            self.hub.hub_base = hub_base;
        }
        if let Some(inference_base) = file.hub.inference_base {
            self.hub.inference_base = inference_base;
        }
        if file.hub.token.is_some() {
            self.hub.token = file.hub.token;
        }
    }

    /// API-layer view of this configuration.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            port: self.http.port,
            cors_origins: self.http.cors_origins.clone(),
            timeout_secs: self.http.timeout_secs,
            enable_swagger: self.http.enable_swagger,
            max_upload_bytes: self.http.max_body_size,
            ..Default::default()
        }
    }

    /// Provider view of this configuration.
    pub fn provider_config(&self) -> RemoteProviderConfig {
        RemoteProviderConfig {
            hub_base: self.hub.hub_base.clone(),
            inference_base: self.hub.inference_base.clone(),
            token: self.hub.token.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let remote = RemoteProviderConfig::default();
        Self {
            http: HttpConfig {
                port: 8080,
                cors_origins: vec!["*".to_string()],
                max_body_size: 10 * 1024 * 1024, // 10MB
                timeout_secs: 300,
                enable_swagger: true,
            },
            hub: HubConfig {
                hub_base: remote.hub_base,
                inference_base: remote.inference_base,
                token: None,
            },
        }
    }
}

impl FileConfig {
    fn from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args_with(config: PathBuf) -> CliArgs {
        CliArgs {
            port: 9000,
            config,
            hub_base: None,
            inference_base: None,
            token: None,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.timeout_secs, 300);
        assert!(config.hub.token.is_none());
    }

    #[test]
    fn cli_args_override_defaults() {
        let mut args = args_with(PathBuf::from("nonexistent.toml"));
        args.hub_base = Some("http://localhost:9999/api".to_string());

        let config = ServerConfig::load(&args).unwrap();
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.hub.hub_base, "http://localhost:9999/api");
    }

    #[test]
    fn file_values_fill_in_but_cli_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[http]\nport = 7000\ntimeout_secs = 60\n\n[hub]\ntoken = \"secret\"\n"
        )
        .unwrap();

        let config = ServerConfig::load(&args_with(file.path().to_path_buf())).unwrap();
        // CLI port beats the file's 7000
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.timeout_secs, 60);
        assert_eq!(config.hub.token.as_deref(), Some("secret"));
        // Untouched fields keep defaults
        assert_eq!(config.http.max_body_size, 10 * 1024 * 1024);
    }

    #[test]
    fn api_and_provider_views_track_the_merge() {
        let config = ServerConfig::default();
        let api = config.api_config();
        assert_eq!(api.port, 8080);
        assert_eq!(api.max_upload_bytes, 10 * 1024 * 1024);

        let provider = config.provider_config();
        assert_eq!(provider.hub_base, RemoteProviderConfig::default().hub_base);
    }
}
