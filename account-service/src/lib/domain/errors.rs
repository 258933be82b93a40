use thiserror::Error;

use crate::domain::account::errors::AccountNameError;
use crate::domain::account::errors::AccountTypeError;
use crate::domain::account::errors::EmailError;

/// Error for event publishing operations
#[derive(Debug, Clone, Error)]
pub enum EventPublisherError {
    #[error("Failed to serialize event: {0}")]
    SerializationFailed(String),

    #[error("Failed to publish event to broker: {0}")]
    PublishFailed(String),

    #[error("Event publishing timeout: {0}")]
    Timeout(String),
}

/// Closed error enumeration for all authentication and credential
/// lifecycle operations.
///
/// Callers branch on variants exhaustively; there are no sentinel values
/// or string-matched errors anywhere in the domain.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Validation errors, rejected before any store access
    #[error("Invalid account name: {0}")]
    InvalidName(#[from] AccountNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid account type: {0}")]
    InvalidAccountType(#[from] AccountTypeError),

    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    // Domain-level errors
    #[error("Email already in use: {0}")]
    EmailInUse(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid confirmation token")]
    InvalidConfirmationToken,

    #[error("Confirmation token expired")]
    ConfirmationTokenExpired,

    // Infrastructure errors, wrapped with operation context
    #[error("Storage error during {operation}: {message}")]
    Storage { operation: String, message: String },

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Configuration error: missing or invalid {0:?}")]
    Configuration(Vec<String>),
}

impl AuthError {
    /// Wrap a storage failure with the name of the failed operation.
    ///
    /// The cause is stringified; no query parameters or secrets are
    /// carried along.
    pub fn storage(operation: &str, cause: impl ToString) -> Self {
        Self::Storage {
            operation: operation.to_string(),
            message: cause.to_string(),
        }
    }
}

impl From<auth::IdCodecError> for AuthError {
    fn from(err: auth::IdCodecError) -> Self {
        match err {
            auth::IdCodecError::WeakSalt { .. } => {
                AuthError::Configuration(vec!["identifier salt".to_string()])
            }
            auth::IdCodecError::MalformedIdentifier(msg) => AuthError::MalformedIdentifier(msg),
        }
    }
}

impl From<auth::TokenError> for AuthError {
    fn from(err: auth::TokenError) -> Self {
        match err {
            auth::TokenError::TokenExpired => AuthError::TokenExpired,
            auth::TokenError::InvalidKey(_) => {
                AuthError::Configuration(vec!["token signing keypair".to_string()])
            }
            auth::TokenError::EncodingFailed(msg) | auth::TokenError::InvalidToken(msg) => {
                AuthError::InvalidToken(msg)
            }
        }
    }
}

impl From<auth::PasswordError> for AuthError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::InvalidPepper(_) => {
                AuthError::Configuration(vec!["password salt".to_string()])
            }
            // A digest that cannot be hashed against or parsed is a data
            // problem, not a wrong password.
            auth::PasswordError::HashingFailed(msg)
            | auth::PasswordError::VerificationFailed(msg) => {
                AuthError::storage("password digest", msg)
            }
        }
    }
}

impl From<EventPublisherError> for AuthError {
    fn from(err: EventPublisherError) -> Self {
        AuthError::Delivery(err.to_string())
    }
}
