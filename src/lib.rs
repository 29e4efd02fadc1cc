pub mod cli;
pub mod config;
pub mod llm;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod safety;

use cli::Args;
use config::PipelineConfig;
use llm::LlmConfig;
use llm::chat::new_client as new_chat_client;
use log::info;
use pipeline::{ LogObserver, QueryPipeline };
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let output = answer(&args).await?;
    println!("{}", output);
    Ok(())
}

/// Runs the question through the pipeline and renders the pretty-printed
/// `{"response", "metrics"}` document. Pipeline failures are reported with
/// the stage they stopped at.
pub async fn answer(args: &Args) -> Result<String, Box<dyn Error + Send + Sync>> {
    let config = PipelineConfig::from_args(args)?;
    let llm_config = LlmConfig::from_args(args)?;

    info!("--- Query Configuration ---");
    info!("Endpoint: {} ({})", args.base_url, llm_config.flavor);
    info!("Model: {}", config.invocation.model);
    info!("Temperature: {}", config.invocation.temperature);
    info!("Max Output Tokens: {}", config.invocation.max_output_tokens);
    info!(
        "Pricing (USD/M tokens): input {} / output {}",
        config.pricing.input_per_million,
        config.pricing.output_per_million
    );
    info!("Prompt Path: {}", config.prompt_path.display());
    info!("Response Schema: {}", config.schema);
    info!("Metrics Path: {}", config.metrics_path.display());
    info!("On Storage Error: {}", config.storage_policy);
    info!("---------------------------");

    let chat_client = new_chat_client(&llm_config)?;
    let pipeline = QueryPipeline::new(chat_client, config).with_observer(Arc::new(LogObserver));

    let result = pipeline
        .run(&args.question).await
        .map_err(|err| format!("{} stage failed: {}", err.stage(), err))?;

    Ok(serde_json::to_string_pretty(&result)?)
}
