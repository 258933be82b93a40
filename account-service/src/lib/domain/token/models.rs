use std::fmt;

use chrono::DateTime;
use chrono::Utc;

/// Maximum number of live refresh tokens per account.
///
/// When an insert would exceed it, the oldest excess tokens are evicted
/// in the same store transaction.
pub const REFRESH_TOKENS_PER_ACCOUNT_LIMIT: usize = 10;

/// Opaque external refresh token record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefreshTokenId(pub String);

impl RefreshTokenId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RefreshTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Refresh token store record.
///
/// Many-to-one with Account; the association is kept inside the store
/// and preserved across rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: RefreshTokenId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
