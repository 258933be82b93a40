use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::errors::AuthError;
use crate::domain::token::models::RefreshToken;
use crate::domain::token::models::RefreshTokenId;

/// Persistence operations for refresh tokens.
///
/// Every method runs as a single atomic transaction against the backing
/// store. The per-account cap is enforced inside the `add` transaction,
/// so concurrent inserts across service instances can never jointly
/// exceed it.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// List an account's live refresh tokens, newest first.
    ///
    /// # Errors
    /// * `MalformedIdentifier` - Account id fails to decode
    /// * `Storage` - Store operation failed
    async fn list(&self, account_id: &AccountId) -> Result<Vec<RefreshToken>, AuthError>;

    /// Insert a new refresh token for the account.
    ///
    /// If the live-token count would exceed the cap, the oldest excess
    /// tokens (by `created_at`, ties broken by insertion order) are
    /// deleted in the same transaction.
    ///
    /// # Errors
    /// * `MalformedIdentifier` - Account id fails to decode
    /// * `Storage` - Store operation failed
    async fn add(
        &self,
        account_id: &AccountId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AuthError>;

    /// Atomically delete the identified token and insert a replacement
    /// for the same account with fresh timestamps.
    ///
    /// # Errors
    /// * `MalformedIdentifier` - Token id fails to decode
    /// * `NotFound` - No token with this id; nothing is mutated
    /// * `Storage` - Store operation failed
    async fn replace(
        &self,
        token_id: &RefreshTokenId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AuthError>;

    /// Delete one refresh token.
    ///
    /// # Errors
    /// * `MalformedIdentifier` - Token id fails to decode
    /// * `NotFound` - No token with this id
    /// * `Storage` - Store operation failed
    async fn delete(&self, token_id: &RefreshTokenId) -> Result<RefreshTokenId, AuthError>;

    /// Delete every refresh token of one account ("log out everywhere").
    ///
    /// # Returns
    /// External ids of the deleted tokens
    ///
    /// # Errors
    /// * `MalformedIdentifier` - Account id fails to decode
    /// * `Storage` - Store operation failed
    async fn delete_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<RefreshTokenId>, AuthError>;
}
