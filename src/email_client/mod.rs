//! The mail-sending seam.
//!
//! Exactly one implementation of [`MailTransport`] is wired in at startup:
//! the transactional-API client or the SMTP client, chosen by configuration.
//! Everything upstream (dispatcher, routes, scheduler) holds an
//! `Arc<dyn MailTransport>` and cannot tell the difference.

mod api_client;
mod smtp_client;

pub use api_client::ApiEmailClient;
pub use smtp_client::SmtpEmailClient;

use crate::composer::ReminderMessage;
use crate::domain::RecipientEmail;

/// One failed delivery attempt. Never propagated past the dispatcher: the
/// batch loop folds it into a per-recipient outcome and keeps going.
#[derive(thiserror::Error, Debug)]
pub enum DeliveryError {
    #[error("the mail provider rejected the message (status {status})")]
    Provider { status: u16, message: String },
    #[error("failed to reach the mail provider")]
    Network(#[source] anyhow::Error),
}

impl DeliveryError {
    /// Diagnostic detail suitable for a `DispatchOutcome.error` field.
    pub fn detail(&self) -> String {
        match self {
            DeliveryError::Provider { status, message } => {
                format!("provider returned status {status}: {message}")
            }
            DeliveryError::Network(e) => format!("transport failure: {e:#}"),
        }
    }
}

/// Sends one composed message to one address.
///
/// The only component allowed to perform delivery I/O. Every failure comes
/// back as a typed [`DeliveryError`]; implementations must not panic on a
/// bad address or a misbehaving provider.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(
        &self,
        to: &RecipientEmail,
        message: &ReminderMessage,
    ) -> Result<(), DeliveryError>;
}
