use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Answer a support question with a structured JSON reply", long_about = None)]
pub struct Args {
    /// The user's question, sent to the model after screening.
    #[arg(long, alias = "pregunta")]
    pub question: String,

    // --- Model Endpoint Args ---
    /// API key for the completion endpoint.
    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the completion endpoint. A trailing `/v1` is accepted, as the
    /// OpenAI SDKs expect it there.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
    pub base_url: String,

    /// Endpoint flavor: "responses" (/v1/responses) or "chat" (/v1/chat/completions).
    #[arg(long, env = "CHAT_API_FLAVOR", default_value = "responses")]
    pub api_flavor: String,

    /// Model identifier sent with every request.
    #[arg(long, env = "CHAT_MODEL", default_value = "gpt-4.1-mini")]
    pub model: String,

    /// Sampling temperature. Kept low for near-deterministic JSON output.
    #[arg(long, env = "CHAT_TEMPERATURE", default_value = "0.2")]
    pub temperature: f32,

    /// Upper bound on generated tokens.
    #[arg(long, env = "CHAT_MAX_OUTPUT_TOKENS", default_value = "150")]
    pub max_output_tokens: u32,

    // --- Cost Args ---
    /// USD per million input tokens. Overrides the built-in price table.
    #[arg(long, env = "PRICE_INPUT_PER_MILLION")]
    pub price_input_per_million: Option<f64>,

    /// USD per million output tokens. Overrides the built-in price table.
    #[arg(long, env = "PRICE_OUTPUT_PER_MILLION")]
    pub price_output_per_million: Option<f64>,

    // --- Prompt Args ---
    /// Path to the system instruction template. Defaults to the template
    /// shipped for the selected response schema.
    #[arg(long, env = "PROMPT_PATH")]
    pub prompt_path: Option<String>,

    /// Response schema the prompt declares: "standard" (answer, actions) or
    /// "confidence" (answer, confidence, actions).
    #[arg(long, env = "RESPONSE_SCHEMA", default_value = "standard")]
    pub response_schema: String,

    // --- Metrics Args ---
    /// CSV file that receives one metrics row per successful run.
    #[arg(long, env = "METRICS_PATH", default_value = "metrics/metrics.csv")]
    pub metrics_path: String,

    /// Behaviour when the metrics row cannot be written: "fail" or "warn".
    #[arg(long, env = "ON_STORAGE_ERROR", default_value = "fail")]
    pub on_storage_error: String,

    // --- General App Args ---
    /// Enable debug logging
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_is_required() {
        assert!(Args::try_parse_from(["run-query"]).is_err());
    }

    #[test]
    fn spanish_alias_is_accepted() {
        let args = Args::try_parse_from(["run-query", "--pregunta", "¿Dónde está mi pedido?"]).unwrap();
        assert_eq!(args.question, "¿Dónde está mi pedido?");
    }
}
