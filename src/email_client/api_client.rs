use super::{DeliveryError, MailTransport};
use crate::composer::ReminderMessage;
use crate::domain::RecipientEmail;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Client for a Postmark-shaped transactional-email HTTP API.
pub struct ApiEmailClient {
    http_client: Client,
    base_url: String,
    sender: RecipientEmail,
    authorization_token: Secret<String>,
}

impl ApiEmailClient {
    pub fn new(
        base_url: String,
        sender: RecipientEmail,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        // The timeout lives on the client rather than per-request so a slow
        // provider can never stall a batch run indefinitely.
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }
}

#[async_trait::async_trait]
impl MailTransport for ApiEmailClient {
    async fn send(
        &self,
        to: &RecipientEmail,
        message: &ReminderMessage,
    ) -> Result<(), DeliveryError> {
        let url = format!("{}/email", self.base_url);
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: to.as_ref(),
            subject: &message.subject,
            text_body: &message.body,
        };
        let response = self
            .http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.into()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            // Best effort: the body is diagnostics only, an unreadable one
            // must not turn a provider rejection into a transport error.
            let message = response.text().await.unwrap_or_default();
            Err(DeliveryError::Provider { status, message })
        }
    }
}

/// Lifetime parameterisation lets us borrow the message fields instead of
/// allocating a fresh `String` for every field of every send.
#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
}
