use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

/// Domain event published when an email address is confirmed.
#[derive(Debug, Clone)]
pub struct EmailConfirmedEvent {
    pub event_id: String,
    pub email: String,
    pub confirmed_at: DateTime<Utc>,
}

impl EmailConfirmedEvent {
    /// Create a new EmailConfirmed event for the given address.
    pub fn new(email: impl ToString) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            confirmed_at: Utc::now(),
        }
    }
}
