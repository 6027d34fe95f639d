/// A reminder ready to hand to the mail transport. Built fresh for every send,
/// never persisted; the destination address travels separately as the `send`
/// argument because composition only ever looks at the recipient's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    pub subject: String,
    pub body: String,
}

/// Greeting used when a recipient has no stored name.
pub const NAME_PLACEHOLDER: &str = "there";

/// Build the daily reminder for a recipient.
///
/// Pure and infallible: same name in, same message out. Missing or blank names
/// fall back to [`NAME_PLACEHOLDER`]. Keeping content assembly free of any
/// delivery concern is what lets us test it (and the transports) in isolation.
pub fn compose(name: Option<&str>) -> ReminderMessage {
    let name = match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => NAME_PLACEHOLDER,
    };
    ReminderMessage {
        subject: "Daily Activity Reminder".to_string(),
        body: format!("Hi {name},\n\nDon't forget to log today's activity!\n\n— Fitness Track Platform"),
    }
}
