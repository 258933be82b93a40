use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;

use crate::domain::account::models::EmailAddress;
use crate::domain::confirmation::events::EmailConfirmedEvent;
use crate::domain::confirmation::models::ConfirmationToken;
use crate::domain::confirmation::models::ConfirmationTokenRecord;
use crate::domain::confirmation::ports::ConfirmationTokenRepository;
use crate::domain::confirmation::ports::EmailConfirmationPort;
use crate::domain::confirmation::ports::EmailSender;
use crate::domain::errors::AuthError;
use crate::domain::ports::EventPublisher;

/// Default bound on a single email delivery attempt.
pub const EMAIL_SEND_TIMEOUT: StdDuration = StdDuration::from_secs(5);

/// Domain service for the email confirmation workflow.
///
/// Issues one-time expiring tokens, delegates delivery to the email
/// transport, and publishes a notification once an address is confirmed.
/// Nothing here retries; retry policy belongs to the caller.
pub struct EmailConfirmationService<CR, ES, EP>
where
    CR: ConfirmationTokenRepository,
    ES: EmailSender,
    EP: EventPublisher,
{
    repository: Arc<CR>,
    emailer: Arc<ES>,
    events: Arc<EP>,
    confirmation_path: String,
    token_ttl: Duration,
    send_timeout: StdDuration,
}

impl<CR, ES, EP> EmailConfirmationService<CR, ES, EP>
where
    CR: ConfirmationTokenRepository,
    ES: EmailSender,
    EP: EventPublisher,
{
    /// Create a new email confirmation service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Confirmation token persistence
    /// * `emailer` - Outbound email transport
    /// * `events` - Domain notification publisher
    /// * `confirmation_path` - URL path of the confirmation endpoint
    /// * `token_ttl` - Validity window of issued tokens
    /// * `send_timeout` - Bound on a single delivery attempt
    pub fn new(
        repository: Arc<CR>,
        emailer: Arc<ES>,
        events: Arc<EP>,
        confirmation_path: String,
        token_ttl: Duration,
        send_timeout: StdDuration,
    ) -> Self {
        Self {
            repository,
            emailer,
            events,
            confirmation_path,
            token_ttl,
            send_timeout,
        }
    }

    fn confirmation_link(&self, host: &str, token: &ConfirmationToken) -> Result<String, AuthError> {
        if host.trim().is_empty() {
            return Err(AuthError::Delivery(
                "cannot build confirmation link: request host is empty".to_string(),
            ));
        }

        Ok(format!(
            "https://{}{}?token={}",
            host,
            self.confirmation_path,
            token.as_str()
        ))
    }
}

#[async_trait]
impl<CR, ES, EP> EmailConfirmationPort for EmailConfirmationService<CR, ES, EP>
where
    CR: ConfirmationTokenRepository,
    ES: EmailSender,
    EP: EventPublisher,
{
    async fn send(&self, email: &EmailAddress, host: &str) -> Result<(), AuthError> {
        tracing::info!("issue confirmation token for {}", email);

        let token = ConfirmationToken::generate();
        self.repository
            .insert(ConfirmationTokenRecord {
                token: token.as_str().to_string(),
                email: email.to_string(),
                expires_at: Utc::now() + self.token_ttl,
            })
            .await?;

        let link = self.confirmation_link(host, &token)?;
        match tokio::time::timeout(
            self.send_timeout,
            self.emailer.send_confirmation(email.as_str(), &link),
        )
        .await
        {
            Err(_) => {
                return Err(AuthError::Delivery(
                    "confirmation email delivery timed out".to_string(),
                ))
            }
            Ok(result) => result?,
        }

        tracing::info!("sent confirmation email to {}", email);
        Ok(())
    }

    async fn confirm(&self, token: &str) -> Result<(), AuthError> {
        // Lookup and invalidation are one atomic store operation, so a
        // token confirms at most once.
        let record = self
            .repository
            .consume(token)
            .await?
            .ok_or(AuthError::InvalidConfirmationToken)?;

        if Utc::now() > record.expires_at {
            return Err(AuthError::ConfirmationTokenExpired);
        }

        let event = EmailConfirmedEvent::new(&record.email);
        if let Err(e) = self.events.publish_email_confirmed(&event).await {
            // Put the record back so the caller can retry: the queue
            // contract is at-least-once, a consumed token with no
            // published notification would be lost for good.
            self.repository.insert(record).await?;
            return Err(e.into());
        }

        tracing::info!("confirmed email {}", record.email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::account::events::AccountCreatedEvent;
    use crate::domain::errors::EventPublisherError;

    mock! {
        pub TestConfirmationRepository {}

        #[async_trait]
        impl ConfirmationTokenRepository for TestConfirmationRepository {
            async fn insert(&self, record: ConfirmationTokenRecord) -> Result<(), AuthError>;
            async fn consume(&self, token: &str) -> Result<Option<ConfirmationTokenRecord>, AuthError>;
        }
    }

    mock! {
        pub TestEmailSender {}

        #[async_trait]
        impl EmailSender for TestEmailSender {
            async fn send_confirmation(&self, recipient: &str, link: &str) -> Result<(), AuthError>;
        }
    }

    mock! {
        pub TestEventPublisher {}

        #[async_trait]
        impl EventPublisher for TestEventPublisher {
            async fn publish_account_created(&self, event: &AccountCreatedEvent) -> Result<(), EventPublisherError>;
            async fn publish_email_confirmed(&self, event: &EmailConfirmedEvent) -> Result<(), EventPublisherError>;
        }
    }

    fn service(
        repository: MockTestConfirmationRepository,
        emailer: MockTestEmailSender,
        events: MockTestEventPublisher,
    ) -> EmailConfirmationService<
        MockTestConfirmationRepository,
        MockTestEmailSender,
        MockTestEventPublisher,
    > {
        EmailConfirmationService::new(
            Arc::new(repository),
            Arc::new(emailer),
            Arc::new(events),
            "/api/v1/users/confirm".to_string(),
            Duration::hours(1),
            EMAIL_SEND_TIMEOUT,
        )
    }

    fn email() -> EmailAddress {
        EmailAddress::new("a@x.com".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_send_persists_and_delivers_link() {
        let mut repository = MockTestConfirmationRepository::new();
        let mut emailer = MockTestEmailSender::new();
        let events = MockTestEventPublisher::new();

        repository
            .expect_insert()
            .withf(|record| {
                record.email == "a@x.com"
                    && record.token.len() == 64
                    && record.expires_at > Utc::now()
            })
            .times(1)
            .returning(|_| Ok(()));

        emailer
            .expect_send_confirmation()
            .withf(|recipient, link| {
                recipient == "a@x.com"
                    && link.starts_with("https://shop.example.com/api/v1/users/confirm?token=")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(repository, emailer, events);
        service.send(&email(), "shop.example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_send_empty_host() {
        let mut repository = MockTestConfirmationRepository::new();
        let mut emailer = MockTestEmailSender::new();
        let events = MockTestEventPublisher::new();

        // The token is persisted before link construction; only delivery fails.
        repository.expect_insert().times(1).returning(|_| Ok(()));
        emailer.expect_send_confirmation().times(0);

        let service = service(repository, emailer, events);

        let result = service.send(&email(), "  ").await;
        assert!(matches!(result, Err(AuthError::Delivery(_))));
    }

    #[tokio::test]
    async fn test_send_surfaces_delivery_failure() {
        let mut repository = MockTestConfirmationRepository::new();
        let mut emailer = MockTestEmailSender::new();
        let events = MockTestEventPublisher::new();

        repository.expect_insert().times(1).returning(|_| Ok(()));
        emailer
            .expect_send_confirmation()
            .times(1)
            .returning(|_, _| Err(AuthError::Delivery("smtp refused".to_string())));

        let service = service(repository, emailer, events);

        let result = service.send(&email(), "shop.example.com").await;
        assert!(matches!(result, Err(AuthError::Delivery(_))));
    }

    #[tokio::test]
    async fn test_confirm_success_publishes_notification() {
        let mut repository = MockTestConfirmationRepository::new();
        let emailer = MockTestEmailSender::new();
        let mut events = MockTestEventPublisher::new();

        repository
            .expect_consume()
            .with(eq("tok"))
            .times(1)
            .returning(|_| {
                Ok(Some(ConfirmationTokenRecord {
                    token: "tok".to_string(),
                    email: "a@x.com".to_string(),
                    expires_at: Utc::now() + Duration::minutes(59),
                }))
            });

        events
            .expect_publish_email_confirmed()
            .withf(|event| event.email == "a@x.com")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, emailer, events);
        service.confirm("tok").await.unwrap();
    }

    #[tokio::test]
    async fn test_confirm_unknown_token() {
        let mut repository = MockTestConfirmationRepository::new();
        let emailer = MockTestEmailSender::new();
        let mut events = MockTestEventPublisher::new();

        repository.expect_consume().times(1).returning(|_| Ok(None));
        events.expect_publish_email_confirmed().times(0);

        let service = service(repository, emailer, events);

        let result = service.confirm("unknown").await;
        assert!(matches!(result, Err(AuthError::InvalidConfirmationToken)));
    }

    #[tokio::test]
    async fn test_confirm_expired_token_publishes_nothing() {
        let mut repository = MockTestConfirmationRepository::new();
        let emailer = MockTestEmailSender::new();
        let mut events = MockTestEventPublisher::new();

        repository.expect_consume().times(1).returning(|_| {
            Ok(Some(ConfirmationTokenRecord {
                token: "tok".to_string(),
                email: "a@x.com".to_string(),
                expires_at: Utc::now() - Duration::minutes(1),
            }))
        });
        events.expect_publish_email_confirmed().times(0);

        let service = service(repository, emailer, events);

        let result = service.confirm("tok").await;
        assert!(matches!(result, Err(AuthError::ConfirmationTokenExpired)));
    }

    #[tokio::test]
    async fn test_confirm_surfaces_publish_failure_and_restores_token() {
        let mut repository = MockTestConfirmationRepository::new();
        let emailer = MockTestEmailSender::new();
        let mut events = MockTestEventPublisher::new();

        repository.expect_consume().times(1).returning(|_| {
            Ok(Some(ConfirmationTokenRecord {
                token: "tok".to_string(),
                email: "a@x.com".to_string(),
                expires_at: Utc::now() + Duration::minutes(30),
            }))
        });
        // The consumed record goes back into the store so the token
        // stays confirmable.
        repository
            .expect_insert()
            .withf(|record| record.token == "tok" && record.email == "a@x.com")
            .times(1)
            .returning(|_| Ok(()));
        events
            .expect_publish_email_confirmed()
            .times(1)
            .returning(|_| Err(EventPublisherError::PublishFailed("broker down".to_string())));

        let service = service(repository, emailer, events);

        let result = service.confirm("tok").await;
        assert!(matches!(result, Err(AuthError::Delivery(_))));
    }

    #[tokio::test]
    async fn test_confirm_retry_succeeds_after_transient_publish_failure() {
        let mut repository = MockTestConfirmationRepository::new();
        let emailer = MockTestEmailSender::new();
        let mut events = MockTestEventPublisher::new();

        repository.expect_consume().times(2).returning(|_| {
            Ok(Some(ConfirmationTokenRecord {
                token: "tok".to_string(),
                email: "a@x.com".to_string(),
                expires_at: Utc::now() + Duration::minutes(30),
            }))
        });
        repository.expect_insert().times(1).returning(|_| Ok(()));

        let mut attempts = 0;
        events
            .expect_publish_email_confirmed()
            .times(2)
            .returning(move |_| {
                attempts += 1;
                if attempts == 1 {
                    Err(EventPublisherError::PublishFailed("broker down".to_string()))
                } else {
                    Ok(())
                }
            });

        let service = service(repository, emailer, events);

        let result = service.confirm("tok").await;
        assert!(matches!(result, Err(AuthError::Delivery(_))));

        service.confirm("tok").await.unwrap();
    }
}
