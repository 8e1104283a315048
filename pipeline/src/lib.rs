//! Core pipeline cache for hfserve.
//!
//! A pipeline is an opaque, expensive-to-construct callable bound to a
//! (task, model id) pair. This crate owns the per-process cache of lazily
//! constructed pipelines and the provider seam that actually builds them.

pub mod cache;
pub mod error;
pub mod provider;
pub mod remote;
pub mod task;

#[cfg(any(test, feature = "test-helpers"))]
pub mod mock;

pub use cache::{PipelineCache, PipelineHandle, PipelineKey};
pub use error::{PipelineError, Result};
pub use provider::{Parameters, Pipeline, PipelineInput, PipelineProvider};
pub use remote::{RemoteProvider, RemoteProviderConfig};
pub use task::Task;
