use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// `token_type` claim value of access tokens.
pub const TOKEN_TYPE_ACCESS: &str = "access";

/// `token_type` claim value of refresh tokens.
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// Claims carried by a short-lived access token.
///
/// Access tokens are stateless: verification needs the public key only,
/// never a store lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessTokenClaims {
    /// Subject (external account identifier)
    pub sub: String,

    /// Account type ("buyer", "seller", or "admin")
    pub account_type: String,

    /// Token kind discriminator, always [`TOKEN_TYPE_ACCESS`]
    pub token_type: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Create access token claims expiring `ttl` from now.
    pub fn new(account_id: impl ToString, account_type: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: account_id.to_string(),
            account_type: account_type.to_string(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Check whether the claims belong to an access token.
    pub fn is_access(&self) -> bool {
        self.token_type == TOKEN_TYPE_ACCESS
    }
}

/// Claims carried by a renewable refresh token.
///
/// Refresh tokens are stateful: `token_id` references a record in the
/// refresh token store and must be checked against it on every use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshTokenClaims {
    /// Subject (external account identifier)
    pub sub: String,

    /// Account type ("buyer", "seller", or "admin")
    pub account_type: String,

    /// External identifier of the backing store record
    pub token_id: String,

    /// Token kind discriminator, always [`TOKEN_TYPE_REFRESH`]
    pub token_type: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl RefreshTokenClaims {
    /// Create refresh token claims expiring at the store record's expiry.
    pub fn new(
        account_id: impl ToString,
        account_type: impl ToString,
        token_id: impl ToString,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: account_id.to_string(),
            account_type: account_type.to_string(),
            token_id: token_id.to_string(),
            token_type: TOKEN_TYPE_REFRESH.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Check whether the claims belong to a refresh token.
    pub fn is_refresh(&self) -> bool {
        self.token_type == TOKEN_TYPE_REFRESH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims() {
        let claims = AccessTokenClaims::new("ie42", "buyer", Duration::minutes(15));

        assert_eq!(claims.sub, "ie42");
        assert_eq!(claims.account_type, "buyer");
        assert!(claims.is_access());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_refresh_claims() {
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::days(30);
        let claims = RefreshTokenClaims::new("ie42", "buyer", "tok99", issued_at, expires_at);

        assert_eq!(claims.sub, "ie42");
        assert_eq!(claims.token_id, "tok99");
        assert!(claims.is_refresh());
        assert!(!claims.token_type.is_empty());
        assert_eq!(claims.exp, expires_at.timestamp());
    }
}
