use thiserror::Error;

/// Error for AccountName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountNameError {
    #[error("Account name must not be empty")]
    Empty,

    #[error("Account name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for AccountType parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountTypeError {
    #[error("Unknown account type: {0}")]
    Unknown(String),
}
