//! Ranked keyword search over the external document index.

mod weaviate;

use async_trait::async_trait;

use crate::core::errors::BotError;
use crate::rag::Passage;

pub use weaviate::WeaviateClient;

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Returns at most `limit` scored passages for `query`. All-or-nothing:
    /// any transport or service error fails the whole call.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Passage>, BotError>;
}
