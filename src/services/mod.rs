pub mod comparison_service;
pub mod llm_service;
pub mod prompts;

pub use comparison_service::ComparisonService;
pub use llm_service::{CompletionClient, LlmService};
