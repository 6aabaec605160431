use anyhow::Context;

use refbot::core::logging;
use refbot::llm::CompletionProvider;
use refbot::state::AppState;
use refbot::telegram::dispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let state = AppState::initialize().context("failed to initialize application state")?;
    logging::init(&state.settings.log_dir);

    let me = state
        .bot
        .get_me()
        .await
        .context("telegram token was rejected")?;
    tracing::info!(
        "authorized as @{}",
        me.username.as_deref().unwrap_or("unknown")
    );

    if !state.search.readiness().await {
        tracing::warn!("knowledge index is not ready; queries will fail until it is");
    }
    match state.llm.health_check().await {
        Ok(true) => {}
        _ => tracing::warn!("completion service health check failed"),
    }

    dispatcher::run(state).await;

    tracing::info!("shut down cleanly");
    Ok(())
}
