//! Single-request pipeline: screen, build, invoke, parse, measure, record,
//! assemble.
//!
//! Stages run strictly in order. The first failure ends the run and no later
//! stage executes, so a metrics row exists only for runs that got a parseable
//! answer back from the model.

pub mod error;
pub mod invoke;
pub mod messages;
pub mod observer;
pub mod parse;
pub mod result;

pub use error::{ PipelineError, PipelineStage };
pub use invoke::{ InvocationSettings, ModelInvoker };
pub use messages::MessageBuilder;
pub use observer::{ LogObserver, PipelineObserver };
pub use parse::{ parse_response, ParsedAnswer };
pub use result::{ assemble, MetricsView, PipelineResult };

use std::sync::Arc;
use uuid::Uuid;

use crate::config::schema::ResponseSchema;
use crate::config::{ PipelineConfig, StorageFailurePolicy };
use crate::llm::chat::ChatClient;
use crate::metrics::{ compute_metrics, CsvMetricsRecorder, MetricsRecorder, ModelPricing };
use crate::safety::SafetyFilter;

pub struct QueryPipeline {
    safety: SafetyFilter,
    builder: MessageBuilder,
    invoker: ModelInvoker,
    schema: ResponseSchema,
    pricing: ModelPricing,
    recorder: Arc<dyn MetricsRecorder>,
    storage_policy: StorageFailurePolicy,
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl QueryPipeline {
    /// `client` is the process-wide endpoint handle; it is shared, not rebuilt.
    pub fn new(client: Arc<dyn ChatClient>, config: PipelineConfig) -> Self {
        Self {
            safety: SafetyFilter::with_default_groups(),
            builder: MessageBuilder::new(&config.prompt_path, config.schema),
            invoker: ModelInvoker::new(client, config.invocation),
            schema: config.schema,
            pricing: config.pricing,
            recorder: Arc::new(CsvMetricsRecorder::new(&config.metrics_path)),
            storage_policy: config.storage_policy,
            observers: Vec::new(),
        }
    }

    pub fn with_safety_filter(mut self, safety: SafetyFilter) -> Self {
        self.safety = safety;
        self
    }

    pub fn with_recorder(mut self, recorder: Arc<dyn MetricsRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub async fn run(&self, question: &str) -> Result<PipelineResult, PipelineError> {
        let run_id = Uuid::new_v4();
        self.notify(|o| o.on_run_start(run_id, question));

        let outcome = self.execute(run_id, question).await;
        match &outcome {
            Ok(result) => self.notify(|o| o.on_complete(run_id, result)),
            Err(err) => self.notify(|o| o.on_failure(run_id, err)),
        }
        outcome
    }

    async fn execute(&self, run_id: Uuid, question: &str) -> Result<PipelineResult, PipelineError> {
        self.enter(run_id, PipelineStage::Validating);
        self.validate(question)?;
        self.exit(run_id, PipelineStage::Validating);

        self.enter(run_id, PipelineStage::Building);
        let conversation = self.builder.build_conversation(question)?;
        self.exit(run_id, PipelineStage::Building);

        self.enter(run_id, PipelineStage::Invoking);
        let (invocation, latency_ms) = self.invoker.invoke(&conversation).await?;
        self.notify(|o| o.on_invocation(run_id, latency_ms));
        self.exit(run_id, PipelineStage::Invoking);

        self.enter(run_id, PipelineStage::Parsing);
        let answer = parse_response(&invocation)?;
        let missing = answer.missing_keys(self.schema.required_keys());
        if !missing.is_empty() {
            self.notify(|o| o.on_schema_drift(run_id, &missing));
        }
        self.exit(run_id, PipelineStage::Parsing);

        self.enter(run_id, PipelineStage::ComputingMetrics);
        let metrics = compute_metrics(&invocation, latency_ms, &self.pricing);
        self.notify(|o| o.on_metrics(run_id, &metrics));
        self.exit(run_id, PipelineStage::ComputingMetrics);

        self.enter(run_id, PipelineStage::Recording);
        if let Err(err) = self.recorder.append(&metrics).await {
            let err = PipelineError::from(err);
            match self.storage_policy {
                StorageFailurePolicy::Fail => {
                    return Err(err);
                }
                StorageFailurePolicy::Warn => {
                    self.notify(|o| o.on_storage_failure_tolerated(run_id, &err));
                }
            }
        }
        self.exit(run_id, PipelineStage::Recording);

        self.enter(run_id, PipelineStage::Assembled);
        Ok(assemble(answer, &metrics))
    }

    fn validate(&self, question: &str) -> Result<(), PipelineError> {
        if question.trim().is_empty() {
            return Err(PipelineError::Validation {
                reason: "question is empty".to_string(),
            });
        }
        if let Some(hit) = self.safety.first_match(question) {
            return Err(PipelineError::Validation {
                reason: format!("possible prompt injection ({} pattern)", hit.group),
            });
        }
        Ok(())
    }

    fn enter(&self, run_id: Uuid, stage: PipelineStage) {
        self.notify(|o| o.on_stage_enter(run_id, stage));
    }

    fn exit(&self, run_id: Uuid, stage: PipelineStage) {
        self.notify(|o| o.on_stage_exit(run_id, stage));
    }

    fn notify<F: Fn(&dyn PipelineObserver)>(&self, event: F) {
        for observer in &self.observers {
            event(observer.as_ref());
        }
    }
}
