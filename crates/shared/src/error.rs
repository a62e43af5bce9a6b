use thiserror::Error;

/// Failure talking to the order-tracking backend.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected http status {status}")]
    Status { status: u16 },
    #[error("malformed response payload: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        !matches!(self, FetchError::InvalidUrl(_))
    }
}
