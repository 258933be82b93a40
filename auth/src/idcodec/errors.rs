use thiserror::Error;

/// Error type for opaque identifier encoding and decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdCodecError {
    #[error("Salt material too weak: need at least {min} characters, got {actual}")]
    WeakSalt { min: usize, actual: usize },

    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),
}
