use async_trait::async_trait;

use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::TokenPair;
use crate::domain::errors::AuthError;

/// Operations exposed to the presentation layer.
///
/// These are pure domain operations: no transport, no request parsing.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a buyer account.
    ///
    /// # Errors
    /// * `EmailInUse` - Email is already registered
    /// * `Storage` - Store operation failed
    async fn register_buyer(&self, command: RegisterAccountCommand) -> Result<Account, AuthError>;

    /// Register a seller account.
    ///
    /// # Errors
    /// * `EmailInUse` - Email is already registered
    /// * `Storage` - Store operation failed
    async fn register_seller(&self, command: RegisterAccountCommand) -> Result<Account, AuthError>;

    /// Register an admin account.
    ///
    /// # Errors
    /// * `EmailInUse` - Email is already registered
    /// * `Storage` - Store operation failed
    async fn register_admin(&self, command: RegisterAccountCommand) -> Result<Account, AuthError>;

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// The refresh token is persisted in the refresh token store before
    /// the pair is returned.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Storage` - Store operation failed
    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<TokenPair, AuthError>;

    /// Rotate a refresh token: consume the presented one and issue a
    /// replacement bound to the same account.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature invalid or not a refresh token
    /// * `TokenExpired` - Refresh token past its expiry
    /// * `NotFound` - Token absent from the store (already rotated or revoked)
    /// * `Storage` - Store operation failed
    async fn renew_refresh_token(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Mint a short-lived access token from a valid refresh token.
    ///
    /// The refresh token is checked against the store; it stays valid.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature invalid or not a refresh token
    /// * `TokenExpired` - Refresh token past its expiry
    /// * `NotFound` - Token absent from the store (already rotated or revoked)
    /// * `Storage` - Store operation failed
    async fn create_access_token(&self, refresh_token: &str) -> Result<String, AuthError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// The email uniqueness check and the insert run in one storage
    /// transaction; there is no read-then-write window. The returned
    /// account carries its externally encoded identifier.
    ///
    /// # Errors
    /// * `EmailInUse` - Email is already registered
    /// * `Storage` - Store operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AuthError>;

    /// Retrieve an account by email address.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AuthError>;
}
