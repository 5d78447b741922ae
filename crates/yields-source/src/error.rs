use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Internal server error")]
    InternalServerError,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Upstream {endpoint} answered with status {status}")]
    UnexpectedStatus { endpoint: &'static str, status: u16 },

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}
