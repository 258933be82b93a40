use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::errors::AccountNameError;
use crate::domain::account::errors::AccountTypeError;
use crate::domain::account::errors::EmailError;

const ACCOUNT_NAME_MAX_LEN: usize = 64;

/// Account aggregate entity.
///
/// Created on registration; immutable thereafter as far as this
/// subsystem is concerned. The identifier is already externally encoded
/// when the entity leaves the store.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: AccountName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub account_type: AccountType,
    pub created_at: DateTime<Utc>,
}

/// Opaque external account identifier.
///
/// A reversible, salted encoding of the internal store key. Only the
/// store (which owns the codec) can map it back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account display name with validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountName(String);

impl AccountName {
    /// Validate and create an account name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name exceeds the maximum length
    pub fn new(name: String) -> Result<Self, AccountNameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AccountNameError::Empty);
        }
        if trimmed.len() > ACCOUNT_NAME_MAX_LEN {
            return Err(AccountNameError::TooLong {
                max: ACCOUNT_NAME_MAX_LEN,
                actual: trimmed.len(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated email address value object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and create an email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid email address
    pub fn new(email: String) -> Result<Self, EmailError> {
        if !email_address::EmailAddress::is_valid(&email) {
            return Err(EmailError::InvalidFormat(email));
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of account being registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Buyer,
    Seller,
    Admin,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Buyer => "buyer",
            AccountType::Seller => "seller",
            AccountType::Admin => "admin",
        }
    }
}

impl FromStr for AccountType {
    type Err = AccountTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(AccountType::Buyer),
            "seller" => Ok(AccountType::Seller),
            "admin" => Ok(AccountType::Admin),
            other => Err(AccountTypeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated registration input.
///
/// Carries the plaintext password; hashing happens in the service, never
/// in the store.
#[derive(Debug, Clone)]
pub struct RegisterAccountCommand {
    pub name: AccountName,
    pub email: EmailAddress,
    pub password: String,
}

/// Insert payload handed to the account store.
///
/// The password is already hashed here: the store has no cryptographic
/// dependency.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: AccountName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub account_type: AccountType,
    pub created_at: DateTime<Utc>,
}

/// Signed token pair returned by a successful authentication.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
