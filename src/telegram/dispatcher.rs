use std::sync::Arc;
use std::time::Duration;

use crate::core::errors::BotError;
use crate::rag::format_reply;
use crate::state::AppState;
use super::api::Update;
use super::commands::{self, Route};

/// Delay before re-polling after a failed getUpdates call.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Runs the long-polling loop until a shutdown signal arrives.
///
/// Each update is handled in its own task; the loop itself only polls and
/// advances the offset, so a slow query never delays other chats.
pub async fn run(state: Arc<AppState>) {
    let mut offset = 0i64;

    tracing::info!("starting update polling loop");
    loop {
        let updates = tokio::select! {
            result = state.bot.get_updates(offset) => result,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received, stopping polling loop");
                return;
            }
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(err) => {
                tracing::warn!("failed to fetch updates: {}", err);
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            dispatch_update(state.clone(), update);
        }
    }
}

/// Hands one update to a worker task and returns immediately. Transport
/// failures that escape the handler hit the outer hook: log, then try a
/// generic apology.
fn dispatch_update(state: Arc<AppState>, update: Update) {
    let Some(message) = update.message else {
        return;
    };
    let Some(text) = message.text else {
        return;
    };
    let chat_id = message.chat.id;

    tokio::spawn(async move {
        if let Err(err) = handle_message(&state, chat_id, &text).await {
            tracing::error!("unhandled error in chat {}: {}", chat_id, err);
            if let Err(send_err) = state
                .bot
                .send_message(chat_id, commands::TRANSPORT_FAILED_TEXT)
                .await
            {
                tracing::error!("failed to deliver apology to chat {}: {}", chat_id, send_err);
            }
        }
    });
}

async fn handle_message(state: &AppState, chat_id: i64, text: &str) -> Result<(), BotError> {
    match commands::route_message(text) {
        Route::Start => state.bot.send_message(chat_id, commands::WELCOME_TEXT).await,
        Route::Help => state.bot.send_message(chat_id, commands::HELP_TEXT).await,
        Route::Ignore => Ok(()),
        Route::Query(query) => handle_query(state, chat_id, &query).await,
    }
}

/// Runs one query under the concurrency bound. A failed orchestration is
/// answered with the fixed apology; only transport failures bubble out.
async fn handle_query(state: &AppState, chat_id: i64, query: &str) -> Result<(), BotError> {
    let _permit = state
        .query_permits
        .clone()
        .acquire_owned()
        .await
        .map_err(BotError::transport)?;

    state
        .bot
        .send_message(chat_id, commands::SEARCHING_TEXT)
        .await?;

    match state.orchestrator.process_query(query).await {
        Ok(result) => {
            state
                .bot
                .send_message(chat_id, &format_reply(&result))
                .await
        }
        Err(err) => {
            tracing::error!("query failed in chat {}: {}", chat_id, err);
            state
                .bot
                .send_message(chat_id, commands::QUERY_FAILED_TEXT)
                .await
        }
    }
}
