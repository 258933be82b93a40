use thiserror::Error;

/// Error type for signed token operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Invalid signing key material: {0}")]
    InvalidKey(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
