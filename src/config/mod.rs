pub mod prompt;
pub mod schema;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::Args;
use crate::metrics::ModelPricing;
use crate::pipeline::invoke::InvocationSettings;
use self::schema::ResponseSchema;

#[derive(Debug, PartialEq, Eq)]
pub struct ParseOptionError {
    message: String,
}

impl ParseOptionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for ParseOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseOptionError {}

/// What to do when the metrics row cannot be written after an otherwise
/// successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageFailurePolicy {
    /// Surface the storage error and drop the result.
    #[default]
    Fail,
    /// Report the storage error to observers and still return the result.
    Warn,
}

impl fmt::Display for StorageFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageFailurePolicy::Fail => write!(f, "fail"),
            StorageFailurePolicy::Warn => write!(f, "warn"),
        }
    }
}

impl FromStr for StorageFailurePolicy {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(StorageFailurePolicy::Fail),
            "warn" => Ok(StorageFailurePolicy::Warn),
            _ => Err(ParseOptionError::new(format!("Invalid storage failure policy: '{}'", s))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub prompt_path: PathBuf,
    pub schema: ResponseSchema,
    pub invocation: InvocationSettings,
    pub pricing: ModelPricing,
    pub metrics_path: PathBuf,
    pub storage_policy: StorageFailurePolicy,
}

impl PipelineConfig {
    /// Defaults for `model`, with pricing looked up from the published table.
    pub fn for_model(model: &str) -> Result<Self, ParseOptionError> {
        let pricing = ModelPricing::for_model(model).ok_or_else(||
            ParseOptionError::new(format!("No published pricing for model '{}'", model))
        )?;
        Ok(Self {
            prompt_path: PathBuf::from(ResponseSchema::default().default_prompt_path()),
            schema: ResponseSchema::default(),
            invocation: InvocationSettings::new(model),
            pricing,
            metrics_path: PathBuf::from("metrics/metrics.csv"),
            storage_policy: StorageFailurePolicy::default(),
        })
    }

    pub fn from_args(args: &Args) -> Result<Self, ParseOptionError> {
        let schema: ResponseSchema = args.response_schema.parse()?;
        let storage_policy: StorageFailurePolicy = args.on_storage_error.parse()?;
        let pricing = resolve_pricing(
            &args.model,
            args.price_input_per_million,
            args.price_output_per_million
        )?;

        if !(0.0..=2.0).contains(&args.temperature) {
            return Err(
                ParseOptionError::new(
                    format!("Temperature must be between 0 and 2, got {}", args.temperature)
                )
            );
        }
        if args.max_output_tokens == 0 {
            return Err(ParseOptionError::new("Max output tokens must be greater than zero"));
        }

        Ok(Self {
            prompt_path: args.prompt_path
                .as_deref()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(schema.default_prompt_path())),
            schema,
            invocation: InvocationSettings {
                model: args.model.clone(),
                temperature: args.temperature,
                max_output_tokens: args.max_output_tokens,
            },
            pricing,
            metrics_path: PathBuf::from(&args.metrics_path),
            storage_policy,
        })
    }
}

/// Explicit prices win over the table; a model missing from the table needs both.
fn resolve_pricing(
    model: &str,
    input_override: Option<f64>,
    output_override: Option<f64>
) -> Result<ModelPricing, ParseOptionError> {
    for price in [input_override, output_override].into_iter().flatten() {
        if !price.is_finite() || price < 0.0 {
            return Err(ParseOptionError::new(format!("Invalid token price: {}", price)));
        }
    }
    match (ModelPricing::for_model(model), input_override, output_override) {
        (_, Some(input), Some(output)) => Ok(ModelPricing::new(input, output)),
        (Some(table), input, output) =>
            Ok(
                ModelPricing::new(
                    input.unwrap_or(table.input_per_million),
                    output.unwrap_or(table.output_per_million)
                )
            ),
        (None, _, _) =>
            Err(
                ParseOptionError::new(
                    format!(
                        "No published pricing for model '{}'; pass --price-input-per-million and --price-output-per-million",
                        model
                    )
                )
            ),
    }
}
