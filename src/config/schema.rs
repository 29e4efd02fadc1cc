use std::fmt;
use std::str::FromStr;

use super::ParseOptionError;
use crate::models::FewShotExample;

const EXAMPLE_QUESTION: &str = "¿Cómo puedo restablecer mi contraseña?";

static STANDARD_EXAMPLES: [FewShotExample; 1] = [FewShotExample {
    question: EXAMPLE_QUESTION,
    answer: concat!(
        r#"{"answer":"Puedes restablecer tu contraseña usando el enlace de recuperación en la página de inicio de sesión.","#,
        r#""actions":["Dirigir al usuario a la página de recuperación","Sugerir revisar la carpeta de spam"]}"#
    ),
}];

static CONFIDENCE_EXAMPLES: [FewShotExample; 1] = [FewShotExample {
    question: EXAMPLE_QUESTION,
    answer: concat!(
        r#"{"answer":"Puedes restablecer tu contraseña usando el enlace de recuperación en la página de inicio de sesión.","#,
        r#""confidence":0.90,"#,
        r#""actions":["Dirigir al usuario a la página de recuperación","Sugerir revisar la carpeta de spam"]}"#
    ),
}];

/// The JSON shape the system prompt asks the model to produce.
///
/// Two variants exist and it is not settled which one is authoritative, so
/// the choice is configuration. The parser never enforces these keys; they
/// only drive the few-shot exemplar and drift reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseSchema {
    #[default]
    Standard,
    WithConfidence,
}

impl ResponseSchema {
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            ResponseSchema::Standard => &["answer", "actions"],
            ResponseSchema::WithConfidence => &["answer", "confidence", "actions"],
        }
    }

    /// Shipped system template declaring the same keys as the exemplar.
    pub fn default_prompt_path(&self) -> &'static str {
        match self {
            ResponseSchema::Standard => "prompts/main_prompt.txt",
            ResponseSchema::WithConfidence => "prompts/main_prompt_confidence.txt",
        }
    }

    pub fn few_shot_examples(&self) -> &'static [FewShotExample] {
        match self {
            ResponseSchema::Standard => &STANDARD_EXAMPLES,
            ResponseSchema::WithConfidence => &CONFIDENCE_EXAMPLES,
        }
    }
}

impl fmt::Display for ResponseSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseSchema::Standard => write!(f, "standard"),
            ResponseSchema::WithConfidence => write!(f, "confidence"),
        }
    }
}

impl FromStr for ResponseSchema {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ResponseSchema::Standard),
            "confidence" | "with_confidence" => Ok(ResponseSchema::WithConfidence),
            _ => Err(ParseOptionError::new(format!("Invalid response schema: '{}'", s))),
        }
    }
}
