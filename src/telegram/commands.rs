/// Fixed reply for `/start`.
pub const WELCOME_TEXT: &str = "Welcome! I am here to help answer your questions using our \
knowledge base. You can ask me anything, and I will search through our database to provide \
relevant information with source citations.";

/// Fixed reply for `/help`.
pub const HELP_TEXT: &str = "Here's how to use this bot:\n\n\
1. Simply type your question and send it to me\n\
2. I will search our knowledge base and provide relevant information\n\
3. Each response includes source citations and confidence scores\n\n\
Available commands:\n\
/start - Begin interacting with the bot\n\
/help - Show this help message";

/// Interim acknowledgement sent before a query runs.
pub const SEARCHING_TEXT: &str = "Searching knowledge base for relevant information...";

/// Apology when the orchestration itself fails.
pub const QUERY_FAILED_TEXT: &str = "I apologize, but I encountered an error while processing \
your request. Please try again later or rephrase your question.";

/// Apology from the outer transport-error hook.
pub const TRANSPORT_FAILED_TEXT: &str = "I apologize, but an error occurred while processing \
your request. Please try again later.";

/// What the dispatcher should do with one inbound text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Start,
    Help,
    Ignore,
    Query(String),
}

/// Routes an inbound message text. Commands may carry a bot-name suffix
/// (`/help@somebot`); unrecognized commands are dropped without a reply.
pub fn route_message(text: &str) -> Route {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Route::Ignore;
    }

    if let Some(rest) = trimmed.strip_prefix('/') {
        let command = rest
            .split_whitespace()
            .next()
            .and_then(|word| word.split('@').next())
            .unwrap_or("");
        return match command {
            "start" => Route::Start,
            "help" => Route::Help,
            _ => Route::Ignore,
        };
    }

    Route::Query(trimmed.to_string())
}
