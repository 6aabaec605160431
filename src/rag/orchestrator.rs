use std::sync::Arc;

use crate::core::errors::BotError;
use crate::search::SearchBackend;
use super::generator::AnswerGenerator;
use super::types::{AnswerResult, CitedPassage};

/// Sequences one query through retrieval, generation and citation assembly.
///
/// Stateless per invocation; constructed once at startup with its
/// collaborators and shared behind the application state.
pub struct QueryOrchestrator {
    search: Arc<dyn SearchBackend>,
    generator: AnswerGenerator,
    search_limit: usize,
}

impl QueryOrchestrator {
    pub fn new(
        search: Arc<dyn SearchBackend>,
        generator: AnswerGenerator,
        search_limit: usize,
    ) -> Self {
        Self {
            search,
            generator,
            search_limit,
        }
    }

    /// Runs the full pipeline for one question.
    ///
    /// Retrieval must succeed before generation starts; either step's
    /// failure propagates unchanged. Zero retrieved passages still produce
    /// an answer, generated from an empty context block.
    pub async fn process_query(&self, query: &str) -> Result<AnswerResult, BotError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(BotError::InvalidInput(
                "query must not be empty".to_string(),
            ));
        }

        let passages = self.search.search(query, self.search_limit).await?;
        tracing::debug!(passages = passages.len(), "retrieval complete");

        let response_text = self.generator.generate(query, &passages).await?;

        let cited_passages = passages.iter().map(CitedPassage::from_passage).collect();
        Ok(AnswerResult {
            response_text,
            cited_passages,
        })
    }
}
