use async_trait::async_trait;

use crate::domain::account::models::EmailAddress;
use crate::domain::confirmation::models::ConfirmationTokenRecord;
use crate::domain::errors::AuthError;

/// Email confirmation operations exposed to the presentation layer.
#[async_trait]
pub trait EmailConfirmationPort: Send + Sync + 'static {
    /// Issue a confirmation token for the address, persist it, and hand
    /// the confirmation link to the email transport.
    ///
    /// `host` is the hostname the request arrived on; the confirmation
    /// link is built against it rather than static configuration.
    ///
    /// # Errors
    /// * `Storage` - Token record could not be persisted
    /// * `Delivery` - Email transport failed or timed out, or `host` is
    ///   empty; the token record is already persisted and stays
    ///   confirmable if the caller resends
    async fn send(&self, email: &EmailAddress, host: &str) -> Result<(), AuthError>;

    /// Verify and consume a confirmation token, then publish the
    /// confirmation notification.
    ///
    /// # Errors
    /// * `InvalidConfirmationToken` - Token unknown or already consumed
    /// * `ConfirmationTokenExpired` - Token past its expiry
    /// * `Delivery` - Notification publish failed
    /// * `Storage` - Store operation failed
    async fn confirm(&self, token: &str) -> Result<(), AuthError>;
}

/// Persistence operations for confirmation tokens.
#[async_trait]
pub trait ConfirmationTokenRepository: Send + Sync + 'static {
    /// Persist a freshly issued token record.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn insert(&self, record: ConfirmationTokenRecord) -> Result<(), AuthError>;

    /// Atomically remove and return the record for this token.
    ///
    /// Consumption and lookup are one operation so a token can never be
    /// confirmed twice, even under concurrent confirms.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn consume(&self, token: &str) -> Result<Option<ConfirmationTokenRecord>, AuthError>;
}

/// Outbound email transport.
#[async_trait]
pub trait EmailSender: Send + Sync + 'static {
    /// Send a confirmation link to the recipient.
    ///
    /// # Errors
    /// * `Delivery` - Transport-level failure
    async fn send_confirmation(&self, recipient: &str, link: &str) -> Result<(), AuthError>;
}
