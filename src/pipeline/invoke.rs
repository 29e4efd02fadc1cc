use std::sync::Arc;
use std::time::Instant;

use crate::llm::chat::{ ChatClient, CompletionRequest, LlmError };
use crate::models::{ Conversation, InvocationResult };

pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 150;

#[derive(Debug, Clone, PartialEq)]
pub struct InvocationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl InvocationSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Sends a conversation to the endpoint and times the call.
#[derive(Clone)]
pub struct ModelInvoker {
    client: Arc<dyn ChatClient>,
    settings: InvocationSettings,
}

impl ModelInvoker {
    pub fn new(client: Arc<dyn ChatClient>, settings: InvocationSettings) -> Self {
        Self { client, settings }
    }

    /// Returns the result and the wall-clock latency of the remote call in
    /// whole milliseconds.
    pub async fn invoke(
        &self,
        conversation: &Conversation
    ) -> Result<(InvocationResult, u64), LlmError> {
        let request = CompletionRequest {
            model: &self.settings.model,
            messages: conversation.messages(),
            temperature: self.settings.temperature,
            max_output_tokens: self.settings.max_output_tokens,
        };

        let started = Instant::now();
        let result = self.client.complete(&request).await?;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        Ok((result, latency_ms))
    }
}
