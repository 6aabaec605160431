use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::errors::BotError;
use super::provider::CompletionProvider;
use super::types::CompletionRequest;

#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiProvider {
    pub fn new(
        base_url: &str,
        api_key: &str,
        request_timeout: Duration,
    ) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(BotError::config)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn health_check(&self) -> Result<bool, BotError> {
        let url = format!("{}/v1/models", self.base_url);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await;
        match res {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, BotError> {
        let url = format!("{}/v1/completions", self.base_url);

        let body = json!({
            "model": request.model,
            "prompt": request.prompt,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(BotError::generation)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(BotError::GenerationUnavailable(format!(
                "completion request failed with {}: {}",
                status, text
            )));
        }

        let payload: Value = response.json().await.map_err(BotError::generation)?;
        extract_completion_text(&payload)
    }
}

/// Pulls the generated text out of a completions payload, trimmed.
fn extract_completion_text(payload: &Value) -> Result<String, BotError> {
    let text = payload["choices"][0]["text"]
        .as_str()
        .ok_or_else(|| {
            BotError::GenerationUnavailable("completion response carried no choices".to_string())
        })?;

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_normalizes_base_url() {
        let provider = OpenAiProvider::new(
            "https://api.openai.com/",
            "sk-test",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(provider.base_url, "https://api.openai.com");
    }

    #[test]
    fn completion_text_is_extracted_and_trimmed() {
        let payload = json!({
            "choices": [{ "text": "\n\nPhotosynthesis is the process...  " }]
        });
        assert_eq!(
            extract_completion_text(&payload).unwrap(),
            "Photosynthesis is the process..."
        );
    }

    #[test]
    fn empty_choices_fail_as_generation_unavailable() {
        let payload = json!({ "choices": [] });
        assert!(matches!(
            extract_completion_text(&payload),
            Err(BotError::GenerationUnavailable(_))
        ));
    }

    #[test]
    fn missing_choices_fail_as_generation_unavailable() {
        let payload = json!({ "error": { "message": "rate limited" } });
        assert!(matches!(
            extract_completion_text(&payload),
            Err(BotError::GenerationUnavailable(_))
        ));
    }
}
