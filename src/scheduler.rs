use crate::configuration::SchedulerSettings;
use crate::dispatcher::{Dispatcher, RunSummary};
use crate::recipient_source::SourceUnavailable;
use anyhow::Context;
use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;

/// The scheduled trigger: fires the dispatcher on a cron expression.
///
/// Both the schedule and the enable flag are process-wide configuration,
/// frozen at construction and re-read only on restart. The loop awaits each
/// run before computing the next fire time, so two runs can never overlap
/// in-process - the dispatcher has no reentrancy guard of its own and relies
/// on this single-flight behavior.
pub struct ReminderScheduler {
    schedule: Schedule,
    enabled: bool,
    dispatcher: Arc<Dispatcher>,
}

impl std::fmt::Debug for ReminderScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderScheduler")
            .field("schedule", &self.schedule)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl ReminderScheduler {
    pub fn new(
        settings: &SchedulerSettings,
        dispatcher: Arc<Dispatcher>,
    ) -> Result<Self, anyhow::Error> {
        let schedule = Schedule::from_str(&settings.cron_expression).with_context(|| {
            format!(
                "`{}` is not a valid cron expression",
                settings.cron_expression
            )
        })?;
        Ok(Self {
            schedule,
            enabled: settings.enabled,
            dispatcher,
        })
    }

    /// Next fire time strictly after `after`, `None` if the expression has
    /// no future occurrence.
    pub fn next_fire(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&after).next()
    }

    /// One scheduled fire. Returns `None` without touching the dispatcher
    /// when the scheduler is disabled: no run, no summary, only a no-op log.
    #[tracing::instrument(name = "Scheduled reminder fire", skip(self))]
    pub async fn fire(&self) -> Option<Result<RunSummary, SourceUnavailable>> {
        if !self.enabled {
            tracing::info!("The daily reminder scheduler is disabled; skipping this run");
            return None;
        }
        Some(self.dispatcher.run().await)
    }

    /// Fire on schedule forever. A failed run is logged and the loop keeps
    /// going - the next fire gets a fresh chance.
    pub async fn run_until_stopped(self) {
        loop {
            let now = Utc::now();
            let Some(next) = self.next_fire(now) else {
                tracing::error!("The cron expression yields no future fire time; stopping the scheduled trigger");
                return;
            };
            let wait = (next - now)
                .to_std()
                .unwrap_or(std::time::Duration::ZERO);
            tokio::time::sleep(wait).await;

            match self.fire().await {
                None => {}
                Some(Ok(summary)) => {
                    tracing::info!(
                        attempted = summary.attempted,
                        succeeded = summary.succeeded,
                        failed = summary.failed,
                        "Completed a scheduled reminder run"
                    );
                }
                Some(Err(e)) => {
                    tracing::error!(
                        error.cause_chain = ?e,
                        "Failed to run the scheduled reminder dispatch"
                    );
                }
            }
        }
    }
}
