mod helpers;
mod reminders;
mod scheduled_run;
