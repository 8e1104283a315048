//! hfserve - HTTP inference server exposing cached model pipelines.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hfserve_server::{AppState, CliArgs, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::load(&args)?;

    info!("Starting hfserve v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP port: {}", config.http.port);
    info!("Model hub: {}", config.hub.hub_base);
    info!("Inference backend: {}", config.hub.inference_base);
    if config.hub.token.is_some() {
        info!("Hub token configured");
    }

    let state = Arc::new(AppState::new(config.provider_config()));

    hfserve_api::run_server_with_config(state, config.api_config()).await
}
