//! Drives the dispatcher the way the scheduled trigger does, end to end:
//! real HTTP recipient source, real API email client, mock servers behind
//! both.

use crate::helpers::spawn_app;
use claims::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn a_run_skips_recipients_without_a_usable_address() {
    // Arrange
    let app = spawn_app().await;

    let listing = serde_json::json!([
        { "name": "Ann", "email": "ann@x.com", "active": true },
        { "name": "Bo", "email": "", "active": true },
    ]);
    Mock::given(path("/api/reminders/today"))
        .and(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .expect(1)
        .mount(&app.source_server)
        .await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let summary = assert_ok!(app.dispatcher.run().await);

    // Assert
    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.outcomes[0].recipient, "ann@x.com");
}

#[tokio::test]
async fn a_provider_rejection_is_recorded_per_recipient() {
    // Arrange
    let app = spawn_app().await;

    let listing = serde_json::json!([
        { "name": "Ann", "email": "ann@x.com", "active": true },
    ]);
    Mock::given(path("/api/reminders/today"))
        .and(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .expect(1)
        .mount(&app.source_server)
        .await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let summary = assert_ok!(app.dispatcher.run().await);

    // Assert
    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failed, 1);
    let error = summary.outcomes[0].error.as_deref().unwrap();
    assert!(!error.is_empty());
}

#[tokio::test]
async fn an_unreachable_listing_endpoint_aborts_the_run() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/api/reminders/today"))
        .and(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.source_server)
        .await;
    // No send may be attempted when the snapshot fails.
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    // Act & Assert
    assert_err!(app.dispatcher.run().await);
}
