use log::{ debug, error, info, warn };
use uuid::Uuid;

use super::error::{ PipelineError, PipelineStage };
use super::result::PipelineResult;
use crate::metrics::MetricsRecord;

/// Notified at stage boundaries of a run. Every method defaults to a no-op.
///
/// Observers see events only; they cannot alter control flow.
pub trait PipelineObserver: Send + Sync {
    fn on_run_start(&self, _run_id: Uuid, _question: &str) {}
    fn on_stage_enter(&self, _run_id: Uuid, _stage: PipelineStage) {}
    fn on_stage_exit(&self, _run_id: Uuid, _stage: PipelineStage) {}
    fn on_invocation(&self, _run_id: Uuid, _latency_ms: u64) {}
    fn on_metrics(&self, _run_id: Uuid, _record: &MetricsRecord) {}
    fn on_schema_drift(&self, _run_id: Uuid, _missing_keys: &[String]) {}
    fn on_storage_failure_tolerated(&self, _run_id: Uuid, _error: &PipelineError) {}
    fn on_failure(&self, _run_id: Uuid, _error: &PipelineError) {}
    fn on_complete(&self, _run_id: Uuid, _result: &PipelineResult) {}
}

/// Writes run progress to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn on_run_start(&self, run_id: Uuid, question: &str) {
        info!("[{}] Input received: {}", run_id, question);
    }

    fn on_stage_enter(&self, run_id: Uuid, stage: PipelineStage) {
        let message = match stage {
            PipelineStage::Validating => "Checking whether the input is safe...",
            PipelineStage::Building => "Building messages for the model...",
            PipelineStage::Invoking => "Calling the model...",
            PipelineStage::Parsing => "Parsing JSON response...",
            PipelineStage::ComputingMetrics => "Computing usage metrics...",
            PipelineStage::Recording => "Recording metrics...",
            PipelineStage::Assembled => "Assembling result...",
        };
        info!("[{}] {}", run_id, message);
    }

    fn on_stage_exit(&self, run_id: Uuid, stage: PipelineStage) {
        debug!("[{}] Stage '{}' finished", run_id, stage);
    }

    fn on_invocation(&self, run_id: Uuid, latency_ms: u64) {
        info!("[{}] Model responded in {} ms", run_id, latency_ms);
    }

    fn on_metrics(&self, run_id: Uuid, record: &MetricsRecord) {
        info!("[{}] Input tokens: {}", run_id, record.tokens_prompt);
        info!("[{}] Output tokens: {}", run_id, record.tokens_completion);
        info!("[{}] Estimated cost: ${:.6} USD", run_id, record.estimated_cost_usd);
    }

    fn on_schema_drift(&self, run_id: Uuid, missing_keys: &[String]) {
        warn!(
            "[{}] Response is missing declared keys: {}",
            run_id,
            missing_keys.join(", ")
        );
    }

    fn on_storage_failure_tolerated(&self, run_id: Uuid, error: &PipelineError) {
        warn!("[{}] {}; returning result without a metrics row", run_id, error);
    }

    fn on_failure(&self, run_id: Uuid, error: &PipelineError) {
        error!("[{}] Pipeline failed at stage '{}': {}", run_id, error.stage(), error);
        if let Some(raw) = error.raw_output() {
            error!("[{}] Raw model output: {}", run_id, raw);
        }
    }

    fn on_complete(&self, run_id: Uuid, _result: &PipelineResult) {
        info!("[{}] Result assembled.", run_id);
    }
}
