use thiserror::Error;

use crate::task::Task;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unsupported task '{0}'")]
    UnsupportedTask(String),

    #[error("no default model configured for task '{0}'")]
    NoDefaultModel(Task),

    #[error("failed to load pipeline for task='{task}', model='{model}': {reason}")]
    Load {
        task: Task,
        model: String,
        reason: String,
    },

    #[error("inference failed for model '{model}': {reason}")]
    Inference { model: String, reason: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
