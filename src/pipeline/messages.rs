use std::path::{ Path, PathBuf };

use crate::config::prompt::{ load_system_prompt, PromptError };
use crate::config::schema::ResponseSchema;
use crate::models::Conversation;

/// Builds the conversation for a question: system template, the schema's
/// few-shot pair, then the question.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    template_path: PathBuf,
    schema: ResponseSchema,
}

impl MessageBuilder {
    pub fn new<P: AsRef<Path>>(template_path: P, schema: ResponseSchema) -> Self {
        Self {
            template_path: template_path.as_ref().to_path_buf(),
            schema,
        }
    }

    pub fn build_conversation(&self, question: &str) -> Result<Conversation, PromptError> {
        let system_prompt = load_system_prompt(&self.template_path)?;
        Ok(Conversation::from_parts(system_prompt, self.schema.few_shot_examples(), question))
    }
}
