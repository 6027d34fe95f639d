use crate::domain::Recipient;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// The recipient snapshot could not be obtained. This is the one error that
/// aborts a whole run: with no snapshot there is nothing to dispatch.
#[derive(thiserror::Error, Debug)]
#[error("failed to fetch the recipient snapshot")]
pub struct SourceUnavailable(#[source] pub anyhow::Error);

/// Supplies the current set of users eligible for a reminder.
///
/// The dispatcher treats the returned sequence as a single atomic snapshot:
/// finite, stably ordered, never mutated by us.
#[async_trait::async_trait]
pub trait RecipientSource: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Recipient>, SourceUnavailable>;
}

/// Queries the upstream backend's reminder listing endpoint
/// (`GET {base_url}/api/reminders/today`) for today's active users.
pub struct HttpRecipientSource {
    http_client: Client,
    base_url: String,
    authorization_token: Secret<String>,
}

impl HttpRecipientSource {
    pub fn new(
        base_url: String,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            authorization_token,
        })
    }
}

#[async_trait::async_trait]
impl RecipientSource for HttpRecipientSource {
    #[tracing::instrument(name = "Fetch today's reminder list", skip(self))]
    async fn list_active(&self) -> Result<Vec<Recipient>, SourceUnavailable> {
        let url = format!("{}/api/reminders/today", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.authorization_token.expose_secret())
            .send()
            .await
            .map_err(|e| SourceUnavailable(e.into()))?
            .error_for_status()
            .map_err(|e| SourceUnavailable(e.into()))?;

        let recipients = response
            .json::<Vec<Recipient>>()
            .await
            .map_err(|e| SourceUnavailable(e.into()))?;
        Ok(recipients)
    }
}
