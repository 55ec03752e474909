pub mod llm;

pub use llm::{CompletionClient, OpenAIClient, ReplyService};
