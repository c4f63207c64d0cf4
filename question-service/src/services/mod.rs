pub mod prompt;
pub mod providers;

pub use prompt::PromptBuilder;
pub use providers::{ProviderError, QuestionGenerator};
