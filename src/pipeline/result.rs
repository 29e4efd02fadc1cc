use serde::{ Deserialize, Serialize };

use super::parse::ParsedAnswer;
use crate::metrics::MetricsRecord;

/// Display form of a [`MetricsRecord`]: same fields, cost as a fixed
/// six-decimal string (`"0.000120"`, never `"0.00012"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsView {
    pub timestamp: String,
    pub tokens_prompt: u64,
    pub tokens_completion: u64,
    pub total_tokens: u64,
    pub latency_ms: u64,
    pub estimated_cost_usd: String,
}

impl From<&MetricsRecord> for MetricsView {
    fn from(record: &MetricsRecord) -> Self {
        Self {
            timestamp: record.timestamp.clone(),
            tokens_prompt: record.tokens_prompt,
            tokens_completion: record.tokens_completion,
            total_tokens: record.total_tokens,
            latency_ms: record.latency_ms,
            estimated_cost_usd: format!("{:.6}", record.estimated_cost_usd),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub response: ParsedAnswer,
    pub metrics: MetricsView,
}

pub fn assemble(answer: ParsedAnswer, metrics: &MetricsRecord) -> PipelineResult {
    PipelineResult {
        response: answer,
        metrics: MetricsView::from(metrics),
    }
}
