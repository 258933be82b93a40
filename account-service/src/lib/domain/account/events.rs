use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::Account;

/// Domain event published when a new account is created.
///
/// Contains a snapshot of account data at creation time for downstream
/// consumers. Never carries the password hash.
#[derive(Debug, Clone)]
pub struct AccountCreatedEvent {
    pub event_id: String,
    pub account_id: String,
    pub name: String,
    pub email: String,
    pub account_type: String,
    pub created_at: DateTime<Utc>,
}

impl AccountCreatedEvent {
    /// Create a new AccountCreated event from an account entity.
    pub fn new(account: &Account) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            account_id: account.id.to_string(),
            name: account.name.as_str().to_string(),
            email: account.email.as_str().to_string(),
            account_type: account.account_type.as_str().to_string(),
            created_at: account.created_at,
        }
    }
}
