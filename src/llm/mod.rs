pub mod chat;
use std::str::FromStr;
use std::fmt;

use crate::cli::Args;

/// Wire format spoken by the completion endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiFlavor {
    #[default]
    Responses,
    Chat,
}

impl ApiFlavor {
    pub fn route(&self) -> &'static str {
        match self {
            ApiFlavor::Responses => "/v1/responses",
            ApiFlavor::Chat => "/v1/chat/completions",
        }
    }
}

impl fmt::Display for ApiFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFlavor::Responses => write!(f, "responses"),
            ApiFlavor::Chat => write!(f, "chat"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseApiFlavorError {
    message: String,
}

impl fmt::Display for ParseApiFlavorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseApiFlavorError {}
impl FromStr for ApiFlavor {
    type Err = ParseApiFlavorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "responses" => Ok(ApiFlavor::Responses),
            "chat" | "chat_completions" | "chat-completions" => Ok(ApiFlavor::Chat),
            _ =>
                Err(ParseApiFlavorError {
                    message: format!("Invalid API flavor: '{}'", s),
                }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub flavor: ApiFlavor,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            flavor: ApiFlavor::Responses,
            api_key: None,
            base_url: None,
        }
    }
}

impl LlmConfig {
    pub fn from_args(args: &Args) -> Result<Self, ParseApiFlavorError> {
        Ok(Self {
            flavor: args.api_flavor.parse()?,
            api_key: Some(args.api_key.clone()).filter(|k| !k.trim().is_empty()),
            base_url: Some(args.base_url.clone()).filter(|u| !u.trim().is_empty()),
        })
    }
}
