//! Server crate: configuration loading and the process-wide application
//! state that wires the HTTP API to the pipeline cache.

pub mod config;
pub mod state;

pub use config::{CliArgs, ServerConfig};
pub use state::AppState;
