pub(crate) mod chat;
pub mod gemini;
pub mod openai;
pub mod openrouter;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use openrouter::OpenRouterProvider;
