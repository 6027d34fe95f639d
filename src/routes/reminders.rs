use crate::dispatcher::{Dispatcher, RunSummary};
use crate::domain::{Recipient, RecipientEmail, RecipientName};
use actix_web::{web, HttpResponse};
use uuid::Uuid;

/// One entry of the on-demand payload: a JSON array of `{name, email}`.
#[derive(serde::Deserialize)]
pub struct ReminderRequest {
    name: String,
    email: String,
}

impl TryFrom<ReminderRequest> for Recipient {
    type Error = String;

    fn try_from(request: ReminderRequest) -> Result<Self, Self::Error> {
        let name = RecipientName::parse(request.name)?;
        let email = RecipientEmail::parse(request.email)?;
        Ok(Recipient {
            id: Uuid::new_v4().to_string(),
            name: Some(name.as_ref().to_owned()),
            email: email.as_ref().to_owned(),
            active: true,
        })
    }
}

/// An entry turned away at the boundary. Reported back to the caller so a
/// rejection is visible, never a silent skip.
#[derive(serde::Serialize)]
pub struct RejectedEntry {
    pub email: String,
    pub reason: String,
}

#[derive(serde::Serialize)]
pub struct SendRemindersResponse {
    #[serde(flatten)]
    pub summary: RunSummary,
    pub rejected: Vec<RejectedEntry>,
}

/// The on-demand trigger: dispatch to an explicit recipient list, bypassing
/// the recipient source.
///
/// Shape validation happens here, before anything reaches the dispatcher;
/// entries that fail it land in `rejected` while the valid remainder is
/// dispatched with the usual per-recipient fault isolation. Individual
/// delivery failures therefore never turn into an HTTP error - the response
/// is a 200 carrying the run summary. Only a malformed or empty body is a 400.
#[tracing::instrument(name = "Send reminders on demand", skip_all, fields(entries = body.len()))]
pub async fn send_reminders(
    body: web::Json<Vec<ReminderRequest>>,
    dispatcher: web::Data<Dispatcher>,
) -> HttpResponse {
    if body.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "request body must be a non-empty array" }));
    }

    let mut accepted = Vec::with_capacity(body.len());
    let mut rejected = Vec::new();
    for entry in body.into_inner() {
        let address = entry.email.clone();
        match Recipient::try_from(entry) {
            Ok(recipient) => accepted.push(recipient),
            Err(reason) => {
                tracing::info!(email = %address, reason = %reason, "Rejecting an on-demand entry");
                rejected.push(RejectedEntry {
                    email: address,
                    reason,
                });
            }
        }
    }

    let summary = dispatcher.dispatch_to(accepted).await;
    HttpResponse::Ok().json(SendRemindersResponse { summary, rejected })
}
