use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::SearchSettings;
use crate::core::errors::BotError;
use crate::rag::Passage;
use super::SearchBackend;

/// BM25 search against a Weaviate collection via the GraphQL endpoint.
pub struct WeaviateClient {
    client: Client,
    base_url: String,
    api_key: String,
    openai_api_key: String,
    collection: String,
}

impl WeaviateClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        openai_api_key: &str,
        settings: &SearchSettings,
    ) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.query_timeout_secs))
            .build()
            .map_err(BotError::config)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            openai_api_key: openai_api_key.to_string(),
            collection: settings.collection.clone(),
        })
    }

    /// Reports whether the cluster answers its readiness probe. Used for
    /// startup diagnostics only; queries are attempted regardless.
    pub async fn readiness(&self) -> bool {
        let url = format!("{}/v1/.well-known/ready", self.base_url);
        match self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn graphql_query(&self, query: &str, limit: usize) -> String {
        // JSON string escaping is valid GraphQL string escaping
        let escaped = Value::String(query.to_string()).to_string();
        format!(
            "{{ Get {{ {}(bm25: {{query: {}}}, limit: {}) {{ content _additional {{ certainty }} }} }} }}",
            self.collection, escaped, limit
        )
    }
}

#[async_trait]
impl SearchBackend for WeaviateClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Passage>, BotError> {
        if query.trim().is_empty() {
            return Err(BotError::InvalidInput(
                "search query must not be empty".to_string(),
            ));
        }
        if limit == 0 {
            return Err(BotError::InvalidInput(
                "search limit must be positive".to_string(),
            ));
        }

        let url = format!("{}/v1/graphql", self.base_url);
        let body = json!({ "query": self.graphql_query(query, limit) });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("X-OpenAI-Api-Key", &self.openai_api_key)
            .json(&body)
            .send()
            .await
            .map_err(BotError::search)?;

        if !response.status().is_success() {
            return Err(BotError::SearchUnavailable(format!(
                "index query failed with {}",
                response.status()
            )));
        }

        let payload: Value = response.json().await.map_err(BotError::search)?;
        parse_search_response(&payload, &self.collection)
    }
}

/// Maps a GraphQL payload to passages, clamping certainties to `[0, 1]`.
/// A GraphQL-level error or a body without the expected shape fails the
/// whole call.
fn parse_search_response(payload: &Value, collection: &str) -> Result<Vec<Passage>, BotError> {
    if let Some(errors) = payload.get("errors").and_then(|v| v.as_array()) {
        if let Some(first) = errors.first() {
            let message = first
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown graphql error");
            return Err(BotError::SearchUnavailable(format!(
                "index query failed: {}",
                message
            )));
        }
    }

    let hits = payload
        .get("data")
        .and_then(|v| v.get("Get"))
        .and_then(|v| v.get(collection))
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            BotError::SearchUnavailable("malformed index response".to_string())
        })?;

    let passages = hits
        .iter()
        .map(|hit| {
            let content = hit
                .get("content")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let certainty = hit
                .get("_additional")
                .and_then(|v| v.get("certainty"))
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            Passage::new(content, certainty)
        })
        .collect();

    Ok(passages)
}
