use thiserror::Error;

/// Errors returned by tip payment operations.
#[derive(Debug, Error)]
pub enum TipError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("amount overflow: {0}")]
    AmountOverflow(String),

    #[error("wallet not connected")]
    NotConnected,

    #[error("signing rejected: {0}")]
    SigningRejected(String),

    #[error("transport error: {0}")]
    TransportError(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
