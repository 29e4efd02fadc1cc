pub mod pricing;
pub mod recorder;

pub use pricing::ModelPricing;
pub use recorder::{ append_metrics_csv, CsvMetricsRecorder, MetricsRecorder, RecorderError };

use chrono::{ DateTime, SecondsFormat, Utc };
use serde::{ Deserialize, Serialize };

use crate::models::InvocationResult;

/// Column order of the metrics log. Must match the field order of [`MetricsRecord`].
pub const CSV_COLUMNS: [&str; 6] = [
    "timestamp",
    "tokens_prompt",
    "tokens_completion",
    "total_tokens",
    "latency_ms",
    "estimated_cost_usd",
];

/// Usage telemetry for one model call. Appended to the metrics log, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub timestamp: String,
    pub tokens_prompt: u64,
    pub tokens_completion: u64,
    pub total_tokens: u64,
    pub latency_ms: u64,
    pub estimated_cost_usd: f64,
}

impl MetricsRecord {
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.timestamp,
            self.tokens_prompt,
            self.tokens_completion,
            self.total_tokens,
            self.latency_ms,
            self.estimated_cost_usd
        )
    }
}

pub fn round_to_micros(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

pub fn compute_metrics(
    result: &InvocationResult,
    latency_ms: u64,
    pricing: &ModelPricing
) -> MetricsRecord {
    compute_metrics_at(result, latency_ms, pricing, Utc::now())
}

/// Token counts are taken from the endpoint's usage data as-is; nothing is re-tokenized.
pub fn compute_metrics_at(
    result: &InvocationResult,
    latency_ms: u64,
    pricing: &ModelPricing,
    timestamp: DateTime<Utc>
) -> MetricsRecord {
    let usage = &result.usage;
    let cost = pricing.cost_usd(usage.prompt_tokens, usage.completion_tokens);

    MetricsRecord {
        timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
        tokens_prompt: usage.prompt_tokens,
        tokens_completion: usage.completion_tokens,
        total_tokens: usage.total_tokens,
        latency_ms,
        estimated_cost_usd: round_to_micros(cost),
    }
}
