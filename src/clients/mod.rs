pub mod anthropic;
pub mod openai;
pub mod provider;
pub mod scripted;
pub mod traits;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;
pub use provider::{AiProvider, ProviderKind};
pub use scripted::{RecordedCall, ScriptedClient};
pub use traits::CompletionClient;
