pub mod chat;
pub mod invocation;

pub use chat::{ ChatMessage, Conversation, FewShotExample, Role };
pub use invocation::{ InvocationResult, TokenUsage };
