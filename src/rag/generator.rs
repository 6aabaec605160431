use std::sync::Arc;

use crate::core::config::CompletionSettings;
use crate::core::errors::BotError;
use crate::llm::{CompletionProvider, CompletionRequest};
use super::prompt::build_prompt;
use super::types::Passage;

/// Turns a question plus retrieved passages into a grounded answer by
/// prompting the completion service with fixed parameters.
#[derive(Clone)]
pub struct AnswerGenerator {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl AnswerGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: &CompletionSettings) -> Self {
        Self {
            provider,
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }

    /// Requests one completion conditioned on the passages, in the order
    /// they were retrieved. Failures propagate unchanged; there is no
    /// retry and no fallback text.
    pub async fn generate(&self, query: &str, passages: &[Passage]) -> Result<String, BotError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            prompt: build_prompt(query, passages),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(
            provider = self.provider.name(),
            passages = passages.len(),
            "requesting completion"
        );
        self.provider.complete(request).await
    }
}
