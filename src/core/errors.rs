use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("search service unavailable: {0}")]
    SearchUnavailable(String),
    #[error("generation service unavailable: {0}")]
    GenerationUnavailable(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BotError {
    pub fn search<E: std::fmt::Display>(err: E) -> Self {
        BotError::SearchUnavailable(err.to_string())
    }

    pub fn generation<E: std::fmt::Display>(err: E) -> Self {
        BotError::GenerationUnavailable(err.to_string())
    }

    pub fn transport<E: std::fmt::Display>(err: E) -> Self {
        BotError::Transport(err.to_string())
    }

    pub fn config<E: std::fmt::Display>(err: E) -> Self {
        BotError::Config(err.to_string())
    }
}
