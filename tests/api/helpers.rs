use fitness_reminder::configuration::get_configuration;
use fitness_reminder::dispatcher::Dispatcher;
use fitness_reminder::startup::{build_dispatcher, Application};
use fitness_reminder::telemetry;
use once_cell::sync::Lazy;
use std::sync::Arc;
use wiremock::MockServer;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // We cannot assign the output of `get_subscriber` to a variable based on the value TEST_LOG
    // because the sink is part of the type returned by `get_subscriber`, therefore they are not the
    // same type. We could work around it, but this is the most straight-forward way of moving forward.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        telemetry::init_subscriber(subscriber);
    } else {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        telemetry::init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    /// Stands in for the transactional-email provider.
    pub email_server: MockServer,
    /// Stands in for the upstream backend's reminder listing endpoint.
    pub source_server: MockServer,
    /// The same dispatcher the application serves with, for driving the
    /// scheduled path directly.
    pub dispatcher: Arc<Dispatcher>,
}

impl TestApp {
    pub async fn post_send_reminders(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/reminders/send", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed. All other
    // invocations will instead skip execution.
    Lazy::force(&TRACING);

    // Launch mock servers to stand in for the mail provider and the backend
    let email_server = MockServer::start().await;
    let source_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use a random OS port
        c.application.port = 0;
        c.email_client.base_url = email_server.uri();
        c.recipient_source.base_url = source_server.uri();
        c
    };

    let dispatcher = build_dispatcher(&configuration).expect("Failed to build the dispatcher.");
    let application = Application::build(&configuration, dispatcher.clone())
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());

    // Launch the server as a background task. tokio::spawn returns a handle to the spawned future,
    // but we have no use for it here, hence the non-binding let.
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        email_server,
        source_server,
        dispatcher,
    }
}
