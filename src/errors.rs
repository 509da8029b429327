use thiserror::Error;

#[derive(Error, Debug)]
pub enum TubePulseError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Transcript unavailable for video {0}: {1}")]
    TranscriptUnavailable(String, String),

    #[error("YouTube API error: {0}")]
    YouTube(String),

    #[error("LLM gateway error: {0}")]
    Llm(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, TubePulseError>;
