use chrono::DateTime;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of a generated confirmation token in characters.
const CONFIRMATION_TOKEN_LEN: usize = 64;

/// High-entropy one-time confirmation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationToken(String);

impl ConfirmationToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(CONFIRMATION_TOKEN_LEN)
            .map(char::from)
            .collect();

        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored confirmation token record.
///
/// Created on send, consumed exactly once on confirm, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationTokenRecord {
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}
