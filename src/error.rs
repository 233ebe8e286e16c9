use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing required transfer parameters")]
    MissingParameters,

    #[error("transfer reference exceeds 135 characters")]
    ReferenceTooLong,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("N26 API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
