use thiserror::Error;

/// Errors that abort a paragraphing run
#[derive(Debug, Error)]
pub enum ParagraphError {
    /// The transcript has no lines to paragraph
    #[error("transcript is empty")]
    EmptyTranscript,

    /// Settings rejected before any model call is made
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A model call failed, failing the trial it belonged to
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Failures talking to the model backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to reach model backend: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model backend response was not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("model backend error: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("model backend response had no text content")]
    EmptyResponse,
}
