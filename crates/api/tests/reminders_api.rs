//! HTTP-level integration tests for reminder intake.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, login_token, post_json, post_json_auth};
use mentorhub_events::bus::REMINDER_REQUESTED;
use mentorhub_suggest::MockSuggester;
use serde_json::json;

#[tokio::test]
async fn reminder_is_acknowledged_and_published() {
    let state = common::test_state(common::test_config(), Arc::new(MockSuggester::new())).await;
    let mut events = state.event_bus.subscribe();
    let app = common::build_test_app_with(state);
    let (token, user_id) = login_token(app.clone(), "mentee@example.com", None).await;

    let body = json!({
        "contact": "mentee@example.com",
        "event_title": "Intro to Large Language Models",
        "event_date": "2030-01-20 17:00 UTC",
    });
    let response = post_json_auth(app, "/api/v1/reminders", body, &token).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert!(json["data"]["id"].is_string());
    assert!(json["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Intro to Large Language Models"));

    let event = events.try_recv().unwrap();
    assert_eq!(event.event_type, REMINDER_REQUESTED);
    assert_eq!(event.actor_user_id.as_deref(), Some(user_id.as_str()));
    assert_eq!(event.payload["contact"], "mentee@example.com");
}

#[tokio::test]
async fn reminder_with_empty_contact_is_rejected() {
    let app = common::build_test_app().await;
    let (token, _) = login_token(app.clone(), "mentee@example.com", None).await;

    let body = json!({ "contact": "", "event_title": "Webinar", "event_date": "tomorrow" });
    let response = post_json_auth(app, "/api/v1/reminders", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reminder_requires_session() {
    let app = common::build_test_app().await;

    let body = json!({ "contact": "x@example.com", "event_title": "Webinar", "event_date": "tomorrow" });
    let response = post_json(app, "/api/v1/reminders", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
