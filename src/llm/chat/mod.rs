pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use super::LlmConfig;
use self::openai::OpenAIChatClient;
use crate::models::{ ChatMessage, InvocationResult };

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("request to completion endpoint failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("completion endpoint returned no text output")]
    EmptyResponse,

    #[error("completion endpoint returned no token usage")]
    MissingUsage,
}

/// One completion call: model, ordered messages and sampling bounds.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Single attempt. Failures are returned as-is, never retried.
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<InvocationResult, LlmError>;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let client = OpenAIChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
