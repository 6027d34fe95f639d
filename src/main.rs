use fitness_reminder::configuration::get_configuration;
use fitness_reminder::scheduler::ReminderScheduler;
use fitness_reminder::startup::{build_dispatcher, Application};
use fitness_reminder::telemetry::{get_subscriber, init_subscriber};

/// Two triggers share one dispatcher: the cron loop runs as a background task
/// while the actix server answers on-demand requests. The process stays up
/// for as long as the HTTP surface does; the scheduler loop only ever exits
/// on an expression with no future fire time.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("fitness-reminder".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let dispatcher = build_dispatcher(&configuration)?;
    let scheduler = ReminderScheduler::new(&configuration.scheduler, dispatcher.clone())?;
    let application = Application::build(&configuration, dispatcher).await?;

    tokio::spawn(scheduler.run_until_stopped());
    application.run_until_stopped().await?;
    Ok(())
}
