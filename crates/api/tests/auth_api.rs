//! HTTP-level integration tests for login, session restore, profile
//! completion, and logout.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, login, login_token, patch_json_auth, post_auth,
    post_json, post_json_auth,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// An unknown email creates a bare profile with the role unset.
#[tokio::test]
async fn login_with_new_email_creates_incomplete_profile() {
    let app = common::build_test_app().await;

    let json = login(app, "new@example.com", None).await;

    assert!(json["access_token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["state"], "profile_incomplete");
    assert_eq!(json["user"]["email"], "new@example.com");
    assert_eq!(json["user"]["role"], "unset");
    assert!(!json["user"]["id"].as_str().unwrap().is_empty());
}

/// Logging in twice with the same email resolves to the same profile.
#[tokio::test]
async fn login_is_idempotent_per_email() {
    let app = common::build_test_app().await;

    let first = login(app.clone(), "repeat@example.com", None).await;
    let second = login(app, "Repeat@Example.com", None).await;

    assert_eq!(first["user"]["id"], second["user"]["id"]);
    assert_ne!(first["access_token"], second["access_token"]);
}

/// A seeded user logs straight into a complete profile.
#[tokio::test]
async fn login_as_demo_mentor_is_complete() {
    let app = common::build_test_app().await;

    let json = login(app, "mentor@example.com", None).await;

    assert_eq!(json["state"], "profile_complete");
    assert_eq!(json["user"]["role"], "mentor");
    assert_eq!(json["user"]["name"], "Dr. Evelyn Reed");
    assert_eq!(json["user"]["availability"].as_array().unwrap().len(), 3);
}

/// A role on login that differs from the stored one switches the profile.
#[tokio::test]
async fn login_with_other_role_switches_role() {
    let app = common::build_test_app().await;

    let json = login(app, "mentee@example.com", Some("mentor")).await;

    assert_eq!(json["user"]["role"], "mentor");
    assert!(json["user"]["learning_goals"].is_null());
    assert_eq!(json["user"]["expertise"], json!([]));
}

#[tokio::test]
async fn login_rejects_malformed_email() {
    let app = common::build_test_app().await;

    let response = post_json(app, "/api/v1/auth/login", json!({ "email": "not-an-email" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Session restore and token checks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_restores_cached_profile() {
    let app = common::build_test_app().await;
    let (token, user_id) = login_token(app.clone(), "mentee@example.com", None).await;

    let response = get_auth(app, "/api/v1/auth/session", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["state"], "profile_complete");
    assert_eq!(json["data"]["user"]["id"], user_id);
}

#[tokio::test]
async fn protected_route_without_token_returns_401() {
    let app = common::build_test_app().await;

    let response = get(app, "/api/v1/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let app = common::build_test_app().await;

    let response = get_auth(app, "/api/v1/me", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profile completion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn complete_profile_as_mentee() {
    let app = common::build_test_app().await;
    let (token, _) = login_token(app.clone(), "fresh@example.com", None).await;

    let body = json!({
        "role": "mentee",
        "name": "Fresh Student",
        "learning_goals": "Learn Rust",
        "seeking_mentorship_for": ["career"],
    });
    let response = post_json_auth(app.clone(), "/api/v1/profile/complete", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "mentee");
    assert_eq!(json["data"]["name"], "Fresh Student");
    assert_eq!(json["data"]["seeking_mentorship_for"], json!(["career"]));

    let session = body_json(get_auth(app, "/api/v1/auth/session", &token).await).await;
    assert_eq!(session["data"]["state"], "profile_complete");
}

/// Mentor-only fields on a mentee completion are rejected.
#[tokio::test]
async fn complete_profile_rejects_fields_of_other_role() {
    let app = common::build_test_app().await;
    let (token, _) = login_token(app.clone(), "mixed@example.com", None).await;

    let body = json!({ "role": "mentee", "expertise": ["Rust"] });
    let response = post_json_auth(app, "/api/v1/profile/complete", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn complete_profile_as_other_role_is_rejected() {
    let app = common::build_test_app().await;
    let (token, _) = login_token(app.clone(), "mentee@example.com", None).await;

    let body = json!({ "role": "mentor", "expertise": ["Rust"] });
    let response = post_json_auth(app, "/api/v1/profile/complete", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Updating before completion is out of order.
#[tokio::test]
async fn update_profile_requires_completed_profile() {
    let app = common::build_test_app().await;
    let (token, _) = login_token(app.clone(), "early@example.com", None).await;

    let response = patch_json_auth(app, "/api/v1/profile", json!({ "name": "Early" }), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_profile_merges_partial_fields() {
    let app = common::build_test_app().await;
    let (token, _) = login_token(app.clone(), "mentor@example.com", None).await;

    let response = patch_json_auth(
        app,
        "/api/v1/profile",
        json!({ "bio": "Updated bio", "years_of_experience": 13 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["bio"], "Updated bio");
    assert_eq!(json["data"]["years_of_experience"], 13);
    assert_eq!(json["data"]["name"], "Dr. Evelyn Reed");
    assert_eq!(json["data"]["availability"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// After logout the same token is rejected.
#[tokio::test]
async fn logout_ends_session() {
    let app = common::build_test_app().await;
    let (token, _) = login_token(app.clone(), "mentee@example.com", None).await;

    let response = post_auth(app.clone(), "/api/v1/auth/logout", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, "/api/v1/auth/session", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Session has ended");
}

/// Logging out one session leaves the user's other sessions alive.
#[tokio::test]
async fn logout_only_ends_its_own_session() {
    let app = common::build_test_app().await;
    let (first, _) = login_token(app.clone(), "mentee@example.com", None).await;
    let (second, _) = login_token(app.clone(), "mentee@example.com", None).await;

    post_auth(app.clone(), "/api/v1/auth/logout", &first).await;

    let response = get_auth(app, "/api/v1/me", &second).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Simulated account deletion ends the session but keeps the record.
#[tokio::test]
async fn delete_me_keeps_profile() {
    let app = common::build_test_app().await;
    let (token, user_id) = login_token(app.clone(), "mentee@example.com", None).await;

    let response = delete_auth(app.clone(), "/api/v1/me", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (other, _) = login_token(app.clone(), "mentor@example.com", None).await;
    let response = get_auth(app, &format!("/api/v1/users/{user_id}"), &other).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// File-backed session cache
// ---------------------------------------------------------------------------

/// The cached profile survives on disk and is removed on logout.
#[tokio::test]
async fn file_session_cache_round_trip() {
    use std::sync::Arc;

    use mentorhub_db::session_cache::FileSessionCache;
    use mentorhub_suggest::MockSuggester;

    let dir = tempfile::tempdir().unwrap();
    let mut state = common::test_state(common::test_config(), Arc::new(MockSuggester::new())).await;
    state.session_cache = Arc::new(FileSessionCache::open(dir.path()).await.unwrap());
    let app = common::build_test_app_with(state);

    let (token, user_id) = login_token(app.clone(), "mentee@example.com", None).await;
    let files = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(files, 1);

    let json = body_json(get_auth(app.clone(), "/api/v1/auth/session", &token).await).await;
    assert_eq!(json["data"]["user"]["id"], user_id);

    post_auth(app, "/api/v1/auth/logout", &token).await;
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
