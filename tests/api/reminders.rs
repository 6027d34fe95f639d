use crate::helpers::spawn_app;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn on_demand_reminders_are_sent_to_every_valid_recipient() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!([
        { "name": "Ann", "email": "ann@x.com" },
        { "name": "Bo", "email": "bo@x.com" },
    ]);

    // Act
    let response = app.post_send_reminders(&body).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["attempted"], 2);
    assert_eq!(body["succeeded"], 2);
    assert_eq!(body["failed"], 0);
    assert_eq!(body["rejected"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn malformed_entries_are_rejected_before_dispatch() {
    // Arrange
    let app = spawn_app().await;

    // Only the two well-formed entries may reach the provider.
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!([
        { "name": "Ann", "email": "ann@x.com" },
        { "name": "Broken", "email": "not-an-email" },
        { "name": "Bo", "email": "bo@x.com" },
    ]);

    // Act
    let response = app.post_send_reminders(&body).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["attempted"], 2);
    let rejected = body["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["email"], "not-an-email");
    assert!(!rejected[0]["reason"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn entries_with_a_blank_name_are_rejected() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!([
        { "name": "   ", "email": "ann@x.com" },
    ]);

    // Act
    let response = app.post_send_reminders(&body).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["attempted"], 0);
    assert_eq!(body["rejected"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delivery_failures_do_not_fail_the_request() {
    // Arrange
    let app = spawn_app().await;

    // The provider rejects everything; both entries must still be attempted -
    // the first failure cannot drop the second send.
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let body = serde_json::json!([
        { "name": "Ann", "email": "ann@x.com" },
        { "name": "Bo", "email": "bo@x.com" },
    ]);

    // Act
    let response = app.post_send_reminders(&body).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["attempted"], 2);
    assert_eq!(body["succeeded"], 0);
    assert_eq!(body["failed"], 2);
    for outcome in body["outcomes"].as_array().unwrap() {
        assert_eq!(outcome["succeeded"], false);
        assert!(!outcome["error"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn an_empty_request_body_is_rejected_with_a_400() {
    // Arrange
    let app = spawn_app().await;

    let body = serde_json::json!([]);

    // Act
    let response = app.post_send_reminders(&body).await;

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}
