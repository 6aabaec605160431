use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::BotError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Margin added on top of the long-poll timeout so the HTTP client never
/// cuts a poll short.
const POLL_TIMEOUT_MARGIN_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    result: Option<T>,
}

/// Minimal Bot API client: long polling in, messages out.
#[derive(Clone)]
pub struct BotApi {
    client: Client,
    base_url: String,
    poll_timeout_secs: u64,
}

impl BotApi {
    pub fn new(token: &str, poll_timeout_secs: u64) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(
                poll_timeout_secs + POLL_TIMEOUT_MARGIN_SECS,
            ))
            .build()
            .map_err(BotError::transport)?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{}", TELEGRAM_API_BASE, token),
            poll_timeout_secs,
        })
    }

    /// Verifies the token by asking the API who we are.
    pub async fn get_me(&self) -> Result<User, BotError> {
        self.call("getMe", json!({})).await
    }

    /// Long-polls for updates past `offset`, message updates only.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, BotError> {
        self.call(
            "getUpdates",
            json!({
                "timeout": self.poll_timeout_secs,
                "offset": offset,
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        let _sent: Message = self
            .call("sendMessage", json!({ "chat_id": chat_id, "text": text }))
            .await?;
        Ok(())
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T, BotError> {
        let url = format!("{}/{}", self.base_url, method);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(BotError::transport)?;

        let payload: ApiResponse<T> = response.json().await.map_err(BotError::transport)?;
        if !payload.ok {
            return Err(BotError::Transport(format!(
                "telegram {} failed: {}",
                method,
                payload
                    .description
                    .unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        payload.result.ok_or_else(|| {
            BotError::Transport(format!("telegram {} returned no result", method))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_with_text_message_deserializes() {
        let raw = r#"{
            "update_id": 724,
            "message": {
                "message_id": 12,
                "chat": { "id": 99, "type": "private" },
                "text": "What is photosynthesis?"
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        assert_eq!(update.update_id, 724);
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 99);
        assert_eq!(message.text.as_deref(), Some("What is photosynthesis?"));
    }

    #[test]
    fn update_without_message_deserializes() {
        let update: Update = serde_json::from_str(r#"{ "update_id": 1 }"#).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn message_without_text_deserializes() {
        let raw = r#"{ "message_id": 3, "chat": { "id": 7 } }"#;
        let message: Message = serde_json::from_str(raw).unwrap();
        assert!(message.text.is_none());
    }

    #[test]
    fn api_error_payload_deserializes() {
        let raw = r#"{ "ok": false, "error_code": 401, "description": "Unauthorized" }"#;
        let payload: ApiResponse<Vec<Update>> = serde_json::from_str(raw).unwrap();
        assert!(!payload.ok);
        assert_eq!(payload.description.as_deref(), Some("Unauthorized"));
        assert!(payload.result.is_none());
    }

    #[test]
    fn base_url_embeds_the_token() {
        let api = BotApi::new("123:abc", 50).unwrap();
        assert_eq!(api.base_url, "https://api.telegram.org/bot123:abc");
    }
}
