use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipetError {
    /// Remote model rejected the request or returned no usable text.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),

    /// Transport-level failures from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PipetResult<T> = Result<T, PipetError>;
