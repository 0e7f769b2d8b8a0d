use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model backend error: {message}")]
    Backend { message: String },

    #[error("no questions could be parsed from the reply")]
    EmptyReply,

    #[error("quiz '{0}' already exists")]
    QuizExists(String),

    #[error("quiz '{0}' not found")]
    QuizNotFound(String),

    #[error("invalid quiz name: {0}")]
    InvalidQuizName(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;
