mod health_check;
mod reminders;

pub use health_check::*;
pub use reminders::*;
