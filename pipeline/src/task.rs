//! Inference task vocabulary.
//!
//! Tasks are a closed, small set known at startup. The enum is the routing
//! type; the kebab-case strings are what clients send and what the hosted
//! inference endpoints expect in their URLs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// Category of inference capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    TextClassification,
    TextGeneration,
    Summarization,
    QuestionAnswering,
    FillMask,
    TokenClassification,
    ImageClassification,
}

impl Task {
    /// Every supported task, in display order.
    pub const ALL: [Task; 7] = [
        Task::TextClassification,
        Task::TextGeneration,
        Task::Summarization,
        Task::QuestionAnswering,
        Task::FillMask,
        Task::TokenClassification,
        Task::ImageClassification,
    ];

    /// The wire name of the task (HuggingFace pipeline tag).
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::TextClassification => "text-classification",
            Task::TextGeneration => "text-generation",
            Task::Summarization => "summarization",
            Task::QuestionAnswering => "question-answering",
            Task::FillMask => "fill-mask",
            Task::TokenClassification => "token-classification",
            Task::ImageClassification => "image-classification",
        }
    }

    /// Default model id for the task, used when a request omits `model_id`.
    ///
    /// Every task currently ships a small, fast default; the `Option` guards
    /// tasks added later without one.
    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            Task::TextClassification => {
                Some("distilbert-base-uncased-finetuned-sst-2-english")
            }
            Task::TextGeneration => Some("gpt2"),
            Task::Summarization => Some("facebook/bart-large-cnn"),
            Task::QuestionAnswering => Some("distilbert-base-cased-distilled-squad"),
            Task::FillMask => Some("distilroberta-base"),
            Task::TokenClassification => Some("dslim/bert-base-NER"),
            Task::ImageClassification => Some("google/vit-base-patch16-224"),
        }
    }

    /// Sorted list of supported task names, for error messages.
    pub fn supported_names() -> Vec<&'static str> {
        let mut names: Vec<_> = Task::ALL.iter().map(Task::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text-classification" => Ok(Task::TextClassification),
            "text-generation" => Ok(Task::TextGeneration),
            "summarization" => Ok(Task::Summarization),
            "question-answering" => Ok(Task::QuestionAnswering),
            "fill-mask" => Ok(Task::FillMask),
            "token-classification" => Ok(Task::TokenClassification),
            "image-classification" => Ok(Task::ImageClassification),
            other => Err(PipelineError::UnsupportedTask(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_task() {
        for task in Task::ALL {
            let parsed: Task = task.as_str().parse().unwrap();
            assert_eq!(parsed, task);
        }
    }

    #[test]
    fn rejects_unknown_task() {
        let err = "object-detection".parse::<Task>().unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedTask(ref t) if t == "object-detection"));
    }

    #[test]
    fn every_task_has_a_default_model() {
        for task in Task::ALL {
            assert!(task.default_model().is_some(), "no default for {task}");
        }
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&Task::QuestionAnswering).unwrap();
        assert_eq!(json, "\"question-answering\"");
    }
}
