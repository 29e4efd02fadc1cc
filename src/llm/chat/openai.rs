use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };
use url::Url;

use super::{ ChatClient, CompletionRequest, LlmError };
use crate::llm::{ ApiFlavor, LlmConfig };
use crate::models::{ ChatMessage, InvocationResult, TokenUsage };

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAIChatClient {
    http: HttpClient,
    endpoint: String,
    flavor: ApiFlavor,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct OpenAIResponsesRequest<'a> {
    model: &'a str,
    input: &'a [ChatMessage],
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIResponsesResponse {
    #[serde(default)]
    output: Vec<OpenAIOutputItem>,
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct OpenAIOutputItem {
    #[serde(rename = "type")]
    item_type: String,
    #[serde(default)]
    content: Vec<OpenAIOutputContent>,
}

#[derive(Deserialize)]
struct OpenAIOutputContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl OpenAIResponsesResponse {
    /// Concatenates every `output_text` part of every message item, in order.
    fn output_text(&self) -> Option<String> {
        let parts: Vec<&str> = self.output
            .iter()
            .filter(|item| item.item_type == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.content_type == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.concat())
        }
    }
}

/// Accepts a bare host, an SDK-style `.../v1` base, or the full route.
fn endpoint_for(base_url: &str, flavor: ApiFlavor) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with(flavor.route()) {
        return base.to_string();
    }
    let host = base.strip_suffix("/v1").unwrap_or(base);
    format!("{}{}", host, flavor.route())
}

impl OpenAIChatClient {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        flavor: ApiFlavor
    ) -> Result<Self, LlmError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url).map_err(|e|
            LlmError::Config(format!("Invalid base URL '{}': {}", base_url, e))
        )?;

        let endpoint = endpoint_for(&base_url, flavor);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e|
            LlmError::Config(format!("Invalid API key format: {}", e))
        )?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            endpoint,
            flavor,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key
            .clone()
            .ok_or_else(|| LlmError::Config("OpenAI API key is required".to_string()))?;

        Self::new(api_key, config.base_url.clone(), config.flavor)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post<T: Serialize + ?Sized>(&self, body: &T) -> Result<reqwest::Response, LlmError> {
        debug!("POST {} ({} flavor)", self.endpoint, self.flavor);
        let resp = self.http.post(&self.endpoint).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }
        Ok(resp)
    }

    async fn complete_responses(
        &self,
        request: &CompletionRequest<'_>
    ) -> Result<InvocationResult, LlmError> {
        let req = OpenAIResponsesRequest {
            model: request.model,
            input: request.messages,
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
        };

        let resp = self.post(&req).await?.json::<OpenAIResponsesResponse>().await?;
        let text = resp.output_text().ok_or(LlmError::EmptyResponse)?;
        let usage = resp.usage.ok_or(LlmError::MissingUsage)?;

        Ok(InvocationResult::new(text, usage))
    }

    async fn complete_chat(
        &self,
        request: &CompletionRequest<'_>
    ) -> Result<InvocationResult, LlmError> {
        let req = OpenAIChatRequest {
            model: request.model,
            messages: request.messages,
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        };

        let resp = self.post(&req).await?.json::<OpenAIResponse>().await?;
        let content = resp.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)?;
        let usage = resp.usage.ok_or(LlmError::MissingUsage)?;

        Ok(InvocationResult::new(content, usage))
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<InvocationResult, LlmError> {
        match self.flavor {
            ApiFlavor::Responses => self.complete_responses(request).await,
            ApiFlavor::Chat => self.complete_chat(request).await,
        }
    }
}
