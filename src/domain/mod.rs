mod recipient;
mod recipient_email;
mod recipient_name;

pub use recipient::Recipient;
pub use recipient_email::RecipientEmail;
pub use recipient_name::RecipientName;
