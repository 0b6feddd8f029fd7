use thiserror::Error;

/// Failures talking to the emotion classifier. Invalid input is not one of them.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Request to emotion classifier failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Emotion classifier responded with {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Invalid response from emotion classifier: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
