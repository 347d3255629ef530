//! Answer generation: prompt assembly, credentials and the chat backend

pub mod credentials;
pub mod deepseek;
pub mod prompt;
pub mod synthesizer;

pub use credentials::CredentialStore;
pub use deepseek::ChatCompletionsClient;
pub use prompt::PromptBuilder;
pub use synthesizer::AnswerSynthesizer;
