use async_trait::async_trait;

use crate::error::ProviderError;

/// Opaque text-completion capability.
///
/// Implementations make exactly one request per call; no retries.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Short identifier used in logs and proposal metadata
    fn name(&self) -> &str;

    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ProviderError>;
}
