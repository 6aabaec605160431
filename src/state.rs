use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;

use crate::core::config::Settings;
use crate::core::errors::BotError;
use crate::llm::OpenAiProvider;
use crate::rag::{AnswerGenerator, QueryOrchestrator};
use crate::search::WeaviateClient;
use crate::telegram::BotApi;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("failed to load configuration: {0}")]
    Config(#[source] BotError),

    #[error("failed to build search client: {0}")]
    Search(#[source] BotError),

    #[error("failed to build completion client: {0}")]
    Llm(#[source] BotError),

    #[error("failed to build telegram client: {0}")]
    Transport(#[source] BotError),
}

/// Shared application state: configuration plus the service clients and
/// the orchestrator built from them at startup.
///
/// Explicitly constructed and passed into the dispatch loop; client
/// handles are stateless and safe to share across query tasks.
pub struct AppState {
    pub settings: Settings,
    pub bot: BotApi,
    pub search: Arc<WeaviateClient>,
    pub llm: Arc<OpenAiProvider>,
    pub orchestrator: QueryOrchestrator,
    /// Bounds the number of orchestrations in flight at once.
    pub query_permits: Arc<Semaphore>,
}

impl AppState {
    pub fn initialize() -> Result<Arc<Self>, InitializationError> {
        let settings = Settings::load().map_err(InitializationError::Config)?;

        let bot = BotApi::new(&settings.bot_token, settings.transport.poll_timeout_secs)
            .map_err(InitializationError::Transport)?;

        let search = Arc::new(
            WeaviateClient::new(
                &settings.weaviate_url,
                &settings.weaviate_api_key,
                &settings.openai_api_key,
                &settings.search,
            )
            .map_err(InitializationError::Search)?,
        );

        let llm = Arc::new(
            OpenAiProvider::new(
                &settings.completion.base_url,
                &settings.openai_api_key,
                Duration::from_secs(settings.completion.request_timeout_secs),
            )
            .map_err(InitializationError::Llm)?,
        );

        let generator = AnswerGenerator::new(llm.clone(), &settings.completion);
        let orchestrator = QueryOrchestrator::new(search.clone(), generator, settings.search.limit);
        let query_permits = Arc::new(Semaphore::new(settings.transport.max_concurrent_queries));

        Ok(Arc::new(AppState {
            settings,
            bot,
            search,
            llm,
            orchestrator,
            query_permits,
        }))
    }
}
