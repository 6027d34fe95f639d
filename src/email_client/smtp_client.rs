use super::{DeliveryError, MailTransport};
use crate::composer::ReminderMessage;
use crate::domain::RecipientEmail;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, Secret};

/// SMTP relay alternative to [`super::ApiEmailClient`]. Same contract, picked
/// by `email_client.provider = "smtp"` in configuration.
pub struct SmtpEmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpEmailClient {
    pub fn new(
        host: &str,
        port: u16,
        username: String,
        password: &Secret<String>,
        sender: &RecipientEmail,
    ) -> Result<Self, anyhow::Error> {
        let credentials = Credentials::new(username, password.expose_secret().clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
            .port(port)
            .credentials(credentials)
            .build();
        let sender = sender
            .as_ref()
            .parse::<Mailbox>()
            .map_err(|e| anyhow::anyhow!("invalid sender mailbox: {e}"))?;
        Ok(Self { transport, sender })
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpEmailClient {
    async fn send(
        &self,
        to: &RecipientEmail,
        message: &ReminderMessage,
    ) -> Result<(), DeliveryError> {
        let to = to
            .as_ref()
            .parse::<Mailbox>()
            .map_err(|e| DeliveryError::Network(anyhow::anyhow!("invalid mailbox: {e}")))?;
        let email = Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| DeliveryError::Network(anyhow::Error::new(e)))?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|e| match e.status() {
                // A reply code from the relay is a provider verdict, not a
                // connectivity problem.
                Some(code) => DeliveryError::Provider {
                    status: code.to_string().parse().unwrap_or(0),
                    message: e.to_string(),
                },
                None => DeliveryError::Network(anyhow::Error::new(e)),
            })
    }
}
