use std::fmt;
use thiserror::Error;

use crate::config::prompt::PromptError;
use crate::llm::chat::LlmError;
use crate::metrics::RecorderError;

/// Stages of a run, in execution order. `Assembled` is the success terminal;
/// failure is carried by [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Validating,
    Building,
    Invoking,
    Parsing,
    ComputingMetrics,
    Recording,
    Assembled,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Validating => "validating",
            PipelineStage::Building => "building",
            PipelineStage::Invoking => "invoking",
            PipelineStage::Parsing => "parsing",
            PipelineStage::ComputingMetrics => "computing_metrics",
            PipelineStage::Recording => "recording",
            PipelineStage::Assembled => "assembled",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input rejected: {reason}")]
    Validation {
        reason: String,
    },

    #[error("configuration unavailable: {0}")]
    Configuration(#[from] PromptError),

    #[error("model invocation failed: {0}")]
    RemoteInvocation(#[from] LlmError),

    #[error("model output is not valid JSON: {reason}")]
    MalformedResponse {
        raw: String,
        reason: String,
    },

    #[error("metrics could not be recorded: {0}")]
    Storage(#[from] RecorderError),
}

impl PipelineError {
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::Validation { .. } => PipelineStage::Validating,
            PipelineError::Configuration(_) => PipelineStage::Building,
            PipelineError::RemoteInvocation(_) => PipelineStage::Invoking,
            PipelineError::MalformedResponse { .. } => PipelineStage::Parsing,
            PipelineError::Storage(_) => PipelineStage::Recording,
        }
    }

    /// Raw model output, for malformed responses only.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            PipelineError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
