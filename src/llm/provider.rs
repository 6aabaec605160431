use async_trait::async_trait;

use crate::core::errors::BotError;
use super::types::CompletionRequest;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// return the provider name for logs (e.g. "openai")
    fn name(&self) -> &str;

    /// check if the provider is reachable
    async fn health_check(&self) -> Result<bool, BotError>;

    /// request a single completion
    async fn complete(&self, request: CompletionRequest) -> Result<String, BotError>;
}
