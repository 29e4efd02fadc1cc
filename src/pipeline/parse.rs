use serde::{ Deserialize, Serialize };
use serde_json::{ Map, Value };

use super::error::PipelineError;
use crate::models::InvocationResult;

/// The model's decoded JSON object, keys in the order the model wrote them.
///
/// Only well-formedness is checked. Required keys are not enforced and no
/// defaults are filled in, so callers must not assume any key is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedAnswer(Map<String, Value>);

impl ParsedAnswer {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn missing_keys(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|key| !self.0.contains_key(**key))
            .map(|key| key.to_string())
            .collect()
    }
}

/// Strictly decodes the trimmed model output. No repair is attempted; on
/// failure the untrimmed raw text travels with the error.
pub fn parse_response(result: &InvocationResult) -> Result<ParsedAnswer, PipelineError> {
    let trimmed = result.raw_text.trim();
    let malformed = |reason: String| PipelineError::MalformedResponse {
        raw: result.raw_text.clone(),
        reason,
    };

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => Ok(ParsedAnswer(map)),
        Ok(other) => Err(malformed(format!("expected a JSON object, got {}", json_kind(&other)))),
        Err(e) => Err(malformed(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
