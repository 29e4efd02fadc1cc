use serde::{ Serialize, Deserialize };

/// Token counters reported by the endpoint alongside a completion.
///
/// Both naming schemes are accepted: `input_tokens`/`output_tokens` from the
/// Responses API and `prompt_tokens`/`completion_tokens` from Chat Completions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(alias = "input_tokens")]
    pub prompt_tokens: u64,
    #[serde(alias = "output_tokens")]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Raw text and usage from a single model call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationResult {
    pub raw_text: String,
    pub usage: TokenUsage,
}

impl InvocationResult {
    pub fn new(raw_text: impl Into<String>, usage: TokenUsage) -> Self {
        Self { raw_text: raw_text.into(), usage }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_accepts_responses_api_names() {
        let usage: TokenUsage = serde_json
            ::from_str(r#"{"input_tokens":12,"output_tokens":3,"total_tokens":15}"#)
            .unwrap();
        assert_eq!(usage, TokenUsage { prompt_tokens: 12, completion_tokens: 3, total_tokens: 15 });
    }

    #[test]
    fn usage_accepts_chat_completion_names() {
        let usage: TokenUsage = serde_json
            ::from_str(r#"{"prompt_tokens":7,"completion_tokens":2,"total_tokens":9}"#)
            .unwrap();
        assert_eq!(usage.prompt_tokens, 7);
        assert_eq!(usage.completion_tokens, 2);
        assert_eq!(usage.total_tokens, 9);
    }
}
