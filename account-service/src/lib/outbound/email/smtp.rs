use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use crate::config::EmailConfig;
use crate::domain::confirmation::ports::EmailSender;
use crate::domain::errors::AuthError;

/// SMTP email transport backed by lettre.
#[derive(Clone)]
pub struct LettreEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl LettreEmailSender {
    /// Create a new SMTP transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be set up.
    pub fn new(config: &EmailConfig) -> Result<Self, anyhow::Error> {
        let credentials =
            Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl EmailSender for LettreEmailSender {
    async fn send_confirmation(&self, recipient: &str, link: &str) -> Result<(), AuthError> {
        let body = format!(
            "Please confirm your email address by following this link:\n\n{link}\n\n\
             The link expires shortly after it was requested. If you did not \
             create an account, you can ignore this message."
        );

        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| AuthError::Delivery(format!("invalid sender address: {}", self.from_address)))?,
            )
            .to(recipient
                .parse()
                .map_err(|_| AuthError::Delivery(format!("invalid recipient address: {recipient}")))?)
            .subject("Confirm your email address")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AuthError::Delivery(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| AuthError::Delivery(e.to_string()))?;

        tracing::info!(to = %recipient, "Confirmation email sent");
        Ok(())
    }
}
