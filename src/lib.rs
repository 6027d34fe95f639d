pub mod composer;
pub mod configuration;
pub mod dispatcher;
pub mod domain;
pub mod email_client;
pub mod recipient_source;
pub mod routes;
pub mod scheduler;
pub mod startup;
pub mod telemetry;
