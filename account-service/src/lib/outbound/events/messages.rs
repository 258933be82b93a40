use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::events::AccountCreatedEvent;
use crate::domain::confirmation::events::EmailConfirmedEvent;

/// Serializable envelope for all account-related events.
///
/// Infrastructure representation for event publishing (Kafka, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AccountEventMessage {
    AccountCreated(AccountCreatedMessage),
    EmailConfirmed(EmailConfirmedMessage),
}

/// Serializable message for AccountCreated domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreatedMessage {
    pub event_id: String,
    pub account_id: String,
    pub name: String,
    pub email: String,
    pub account_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<&AccountCreatedEvent> for AccountCreatedMessage {
    fn from(event: &AccountCreatedEvent) -> Self {
        Self {
            event_id: event.event_id.clone(),
            account_id: event.account_id.clone(),
            name: event.name.clone(),
            email: event.email.clone(),
            account_type: event.account_type.clone(),
            created_at: event.created_at,
        }
    }
}

impl From<&AccountCreatedEvent> for AccountEventMessage {
    fn from(event: &AccountCreatedEvent) -> Self {
        AccountEventMessage::AccountCreated(AccountCreatedMessage::from(event))
    }
}

/// Serializable message for EmailConfirmed domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfirmedMessage {
    pub event_id: String,
    pub email: String,
    pub confirmed_at: DateTime<Utc>,
}

impl From<&EmailConfirmedEvent> for EmailConfirmedMessage {
    fn from(event: &EmailConfirmedEvent) -> Self {
        Self {
            event_id: event.event_id.clone(),
            email: event.email.clone(),
            confirmed_at: event.confirmed_at,
        }
    }
}

impl From<&EmailConfirmedEvent> for AccountEventMessage {
    fn from(event: &EmailConfirmedEvent) -> Self {
        AccountEventMessage::EmailConfirmed(EmailConfirmedMessage::from(event))
    }
}
