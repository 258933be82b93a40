use async_trait::async_trait;

use crate::domain::account::events::AccountCreatedEvent;
use crate::domain::confirmation::events::EmailConfirmedEvent;
use crate::domain::errors::EventPublisherError;

/// Fire-and-forget publishing of domain notifications to the message
/// queue. Consumed by unrelated downstream systems; delivery is
/// at-least-once.
#[async_trait]
pub trait EventPublisher: Send + Sync + 'static {
    /// Publish an account creation notification.
    ///
    /// # Errors
    /// * `SerializationFailed` - Event serialization failed
    /// * `PublishFailed` - Failed to publish to broker
    /// * `Timeout` - Publishing timed out
    async fn publish_account_created(
        &self,
        event: &AccountCreatedEvent,
    ) -> Result<(), EventPublisherError>;

    /// Publish an email confirmation notification.
    ///
    /// # Errors
    /// * `SerializationFailed` - Event serialization failed
    /// * `PublishFailed` - Failed to publish to broker
    /// * `Timeout` - Publishing timed out
    async fn publish_email_confirmed(
        &self,
        event: &EmailConfirmedEvent,
    ) -> Result<(), EventPublisherError>;
}
