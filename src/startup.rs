use crate::configuration::{EmailProvider, Settings};
use crate::dispatcher::Dispatcher;
use crate::email_client::{ApiEmailClient, MailTransport, SmtpEmailClient};
use crate::recipient_source::HttpRecipientSource;
use crate::routes;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

/// Wire the dispatcher and its collaborators from configuration.
///
/// This is the one place the transport seam is resolved: the configured
/// provider picks the API client or the SMTP client, and from here on
/// everything sees `Arc<dyn MailTransport>`.
pub fn build_dispatcher(configuration: &Settings) -> Result<Arc<Dispatcher>, anyhow::Error> {
    let sender = configuration
        .email_client
        .sender()
        .map_err(|e| anyhow::anyhow!("Invalid sender email address: {e}"))?;

    let transport: Arc<dyn MailTransport> = match configuration.email_client.provider {
        EmailProvider::Api => Arc::new(ApiEmailClient::new(
            configuration.email_client.base_url.clone(),
            sender,
            configuration.email_client.authorization_token.clone(),
            configuration.email_client.timeout(),
        )?),
        EmailProvider::Smtp => Arc::new(SmtpEmailClient::new(
            &configuration.email_client.smtp_host,
            configuration.email_client.smtp_port,
            configuration.email_client.smtp_username.clone(),
            &configuration.email_client.smtp_password,
            &sender,
        )?),
    };

    let source = Arc::new(HttpRecipientSource::new(
        configuration.recipient_source.base_url.clone(),
        configuration.recipient_source.authorization_token.clone(),
        configuration.recipient_source.timeout(),
    )?);

    Ok(Arc::new(Dispatcher::new(source, transport)))
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(
        configuration: &Settings,
        dispatcher: Arc<Dispatcher>,
    ) -> Result<Self, anyhow::Error> {
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)?;
        // Retrieve the port assigned to us by the OS
        let port = listener.local_addr()?.port();
        let server = run(listener, dispatcher)?;

        // We "save" the bound port in one of `Application`'s fields.
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// A more expressive name that makes it clear that this function only returns when the
    /// application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, dispatcher: Arc<Dispatcher>) -> Result<Server, std::io::Error> {
    // Wrap the dispatcher in a smart pointer actix can clone per worker
    let dispatcher = web::Data::from(dispatcher);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(routes::health_check))
            .route("/reminders/send", web::post().to(routes::send_reminders))
            // Register the dispatcher as part of the application state
            .app_data(dispatcher.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
