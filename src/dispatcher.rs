use crate::composer::compose;
use crate::domain::{Recipient, RecipientEmail};
use crate::email_client::MailTransport;
use crate::recipient_source::{RecipientSource, SourceUnavailable};
use std::sync::Arc;

/// The fate of one recipient within a run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DispatchOutcome {
    pub recipient: String,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate result of one dispatcher run. `attempted` always equals
/// `succeeded + failed`, and `outcomes` holds one entry per attempt in
/// snapshot order - deterministic, so a run can be replayed in tests.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<DispatchOutcome>,
}

impl RunSummary {
    fn from_outcomes(outcomes: Vec<DispatchOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.succeeded).count();
        Self {
            attempted: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            outcomes,
        }
    }
}

/// Orchestrates one batch run: snapshot, compose, send, aggregate.
///
/// The central design property lives in [`Dispatcher::dispatch_to`]: every
/// send is an independent fallible operation whose failure is captured into a
/// typed outcome rather than propagated. One bad address or one transient
/// provider error never drops the rest of the batch.
pub struct Dispatcher {
    source: Arc<dyn RecipientSource>,
    transport: Arc<dyn MailTransport>,
}

impl Dispatcher {
    pub fn new(source: Arc<dyn RecipientSource>, transport: Arc<dyn MailTransport>) -> Self {
        Self { source, transport }
    }

    /// Execute a full run against the recipient source.
    ///
    /// Fails only when the snapshot itself cannot be obtained - in that case
    /// nothing has been attempted and the error surfaces to the trigger.
    #[tracing::instrument(name = "Dispatch daily reminders", skip(self))]
    pub async fn run(&self) -> Result<RunSummary, SourceUnavailable> {
        let snapshot = self.source.list_active().await?;
        Ok(self.dispatch_to(snapshot).await)
    }

    /// Send one reminder per eligible recipient, isolating failures.
    ///
    /// Also the entry point for the on-demand path, which supplies its own
    /// recipient list instead of consulting the source. Infallible by
    /// construction: delivery errors are folded into the summary.
    #[tracing::instrument(name = "Dispatch reminders to recipient list", skip_all, fields(recipients = recipients.len()))]
    pub async fn dispatch_to(&self, recipients: Vec<Recipient>) -> RunSummary {
        let mut outcomes = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            if !recipient.active {
                continue;
            }
            // Blank or malformed stored addresses are skipped, not attempted:
            // they produce no outcome and never reach the transport.
            let email = match RecipientEmail::parse(recipient.email) {
                Ok(email) => email,
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        recipient_id = %recipient.id,
                        "Skipping a recipient with an unusable stored email address"
                    );
                    continue;
                }
            };
            let message = compose(recipient.name.as_deref());
            let outcome = match self.transport.send(&email, &message).await {
                Ok(()) => DispatchOutcome {
                    recipient: email.as_ref().to_string(),
                    succeeded: true,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        recipient_email = %email,
                        "Failed to deliver a reminder"
                    );
                    DispatchOutcome {
                        recipient: email.as_ref().to_string(),
                        succeeded: false,
                        error: Some(e.detail()),
                    }
                }
            };
            outcomes.push(outcome);
        }
        RunSummary::from_outcomes(outcomes)
    }
}
