//! Startup configuration.
//!
//! Secrets and service endpoints come from the environment (same variable
//! names the deployment already uses); tunables come from an optional
//! `config.yml` next to the binary, overridable via `REFBOT_CONFIG_PATH`.
//! There is no runtime reconfiguration.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::BotError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Weaviate collection holding the knowledge base.
    pub collection: String,
    /// Maximum passages retrieved per query.
    pub limit: usize,
    pub query_timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            collection: "Knowledge".to_string(),
            limit: 3,
            query_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub request_timeout_secs: u64,
    pub base_url: String,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo-instruct".to_string(),
            max_tokens: 500,
            temperature: 0.7,
            request_timeout_secs: 120,
            base_url: "https://api.openai.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSettings {
    /// Long-poll timeout passed to getUpdates.
    pub poll_timeout_secs: u64,
    /// Upper bound on orchestrations in flight at once.
    pub max_concurrent_queries: usize,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            poll_timeout_secs: 50,
            max_concurrent_queries: 8,
        }
    }
}

/// Shape of the optional `config.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub search: SearchSettings,
    pub completion: CompletionSettings,
    pub transport: TransportSettings,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bot_token: String,
    pub weaviate_url: String,
    pub weaviate_api_key: String,
    pub openai_api_key: String,
    pub search: SearchSettings,
    pub completion: CompletionSettings,
    pub transport: TransportSettings,
    pub log_dir: PathBuf,
}

impl Settings {
    /// Loads and validates the full configuration. Any missing secret or
    /// out-of-range tunable aborts startup with `BotError::Config`.
    pub fn load() -> Result<Self, BotError> {
        let file = load_config_file(&config_path())?;

        let settings = Settings {
            bot_token: require_env("BOT_TOKEN")?,
            weaviate_url: require_env("WEAVIATE_URL")?,
            weaviate_api_key: require_env("WEAVIATE_API_KEY")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            search: file.search,
            completion: file.completion,
            transport: file.transport,
            log_dir: file.log_dir.unwrap_or_else(|| PathBuf::from("logs")),
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), BotError> {
        if self.search.collection.trim().is_empty() {
            return Err(BotError::Config(
                "search.collection cannot be empty".to_string(),
            ));
        }
        if self.search.limit == 0 {
            return Err(BotError::Config(
                "search.limit must be positive".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.completion.temperature) {
            return Err(BotError::Config(
                "completion.temperature must be between 0 and 2".to_string(),
            ));
        }
        if self.completion.max_tokens == 0 {
            return Err(BotError::Config(
                "completion.max_tokens must be positive".to_string(),
            ));
        }
        if self.transport.max_concurrent_queries == 0 {
            return Err(BotError::Config(
                "transport.max_concurrent_queries must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn config_path() -> PathBuf {
    if let Ok(path) = env::var("REFBOT_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    PathBuf::from("config.yml")
}

fn load_config_file(path: &std::path::Path) -> Result<FileSettings, BotError> {
    if !path.exists() {
        return Ok(FileSettings::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| BotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    serde_yaml::from_str(&contents)
        .map_err(|e| BotError::Config(format!("failed to parse {}: {}", path.display(), e)))
}

fn require_env(name: &str) -> Result<String, BotError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(BotError::Config(format!(
            "environment variable {} is not set",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn settings_with_defaults() -> Settings {
        Settings {
            bot_token: "token".to_string(),
            weaviate_url: "https://cluster.weaviate.network".to_string(),
            weaviate_api_key: "wv-key".to_string(),
            openai_api_key: "sk-key".to_string(),
            search: SearchSettings::default(),
            completion: CompletionSettings::default(),
            transport: TransportSettings::default(),
            log_dir: PathBuf::from("logs"),
        }
    }

    #[test]
    fn defaults_match_deployment() {
        let search = SearchSettings::default();
        assert_eq!(search.collection, "Knowledge");
        assert_eq!(search.limit, 3);

        let completion = CompletionSettings::default();
        assert_eq!(completion.model, "gpt-3.5-turbo-instruct");
        assert_eq!(completion.max_tokens, 500);
        assert!((completion.temperature - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(settings_with_defaults().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_limit() {
        let mut settings = settings_with_defaults();
        settings.search.limit = 0;
        assert!(matches!(settings.validate(), Err(BotError::Config(_))));
    }

    #[test]
    fn validate_rejects_out_of_range_temperature() {
        let mut settings = settings_with_defaults();
        settings.completion.temperature = 3.5;
        assert!(matches!(settings.validate(), Err(BotError::Config(_))));
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut settings = settings_with_defaults();
        settings.transport.max_concurrent_queries = 0;
        assert!(matches!(settings.validate(), Err(BotError::Config(_))));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let file = load_config_file(std::path::Path::new("does-not-exist.yml")).unwrap();
        assert_eq!(file.search.limit, 3);
        assert!(file.log_dir.is_none());
    }

    #[test]
    fn config_file_overrides_merge_with_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "search:\n  limit: 5\ncompletion:\n  temperature: 0.2\nlog_dir: /tmp/refbot-logs"
        )
        .unwrap();

        let file = load_config_file(tmp.path()).unwrap();
        assert_eq!(file.search.limit, 5);
        assert_eq!(file.search.collection, "Knowledge");
        assert!((file.completion.temperature - 0.2).abs() < f64::EPSILON);
        assert_eq!(file.completion.max_tokens, 500);
        assert_eq!(file.log_dir, Some(PathBuf::from("/tmp/refbot-logs")));
    }

    #[test]
    fn malformed_config_file_is_rejected() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "search: [not, a, mapping]").unwrap();

        let result = load_config_file(tmp.path());
        assert!(matches!(result, Err(BotError::Config(_))));
    }

    #[test]
    fn require_env_rejects_missing_and_blank() {
        env::remove_var("REFBOT_TEST_UNSET_VAR");
        assert!(require_env("REFBOT_TEST_UNSET_VAR").is_err());

        env::set_var("REFBOT_TEST_BLANK_VAR", "  ");
        assert!(require_env("REFBOT_TEST_BLANK_VAR").is_err());
        env::remove_var("REFBOT_TEST_BLANK_VAR");
    }
}
