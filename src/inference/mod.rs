pub mod prompt;
pub mod provider;
pub mod providers;

pub use provider::{CompletionProvider, CompletionRequest, ContentExtractor, ProviderError};
pub use providers::{GeminiProvider, OpenAiProvider, OpenRouterProvider};
