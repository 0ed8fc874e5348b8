#![allow(clippy::unwrap_used)]
// Integration tests for `Session` and the admin route guard using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use motorpool_core::{AppConfig, CoreError, RouteDecision, Session, require_admin};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Session) {
    let server = MockServer::start().await;
    let config = AppConfig {
        api_base: server.uri(),
        timeout_secs: 5,
    };
    let session = Session::new(&config).unwrap();
    (server, session)
}

fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "status": "ok", "data": data })
}

fn error_envelope(message: &str) -> serde_json::Value {
    json!({ "status": "error", "message": message })
}

// ── Session tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_token() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "kim@example.com",
            "password": "hunter22",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_envelope(json!({ "token": "jwt-abc" }))),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!({ "role": "user", "is_admin": false }))),
        )
        .mount(&server)
        .await;

    assert!(!session.is_authenticated());

    let secret = SecretString::from("hunter22");
    session.login("kim@example.com", &secret).await.unwrap();
    assert!(session.is_authenticated());

    // The stored token rides on subsequent authenticated calls.
    let user = session.current_user().await.unwrap();
    assert_eq!(user.role, "user");
}

#[tokio::test]
async fn test_login_failure_keeps_session_unauthenticated() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(error_envelope("invalid credentials")),
        )
        .mount(&server)
        .await;

    let secret = SecretString::from("wrong");
    match session.login("kim@example.com", &secret).await {
        Err(CoreError::AuthenticationFailed { ref message }) => {
            assert_eq!(message, "invalid credentials");
        }
        other => panic!("expected AuthenticationFailed, got: {other:?}"),
    }
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_register_stores_token() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "email": "new@example.com",
            "password": "longenough",
            "first_name": "Ada",
            "last_name": "Byron",
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(ok_envelope(json!({ "token": "jwt-new" }))),
        )
        .mount(&server)
        .await;

    let secret = SecretString::from("longenough");
    session
        .register("new@example.com", &secret, "Ada", "Byron")
        .await
        .unwrap();
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_token() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_envelope(json!({ "token": "jwt-abc" }))),
        )
        .mount(&server)
        .await;

    // After logout the bearer header is sent empty and the platform
    // answers with its non-enveloped middleware rejection.
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "unauthorized" })))
        .mount(&server)
        .await;

    let secret = SecretString::from("hunter22");
    session.login("kim@example.com", &secret).await.unwrap();
    assert!(session.is_authenticated());

    session.logout();
    assert!(!session.is_authenticated());

    match session.current_user().await {
        Err(CoreError::AuthenticationFailed { .. }) => {}
        other => panic!("expected AuthenticationFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_clones_share_the_token_slot() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_envelope(json!({ "token": "jwt-abc" }))),
        )
        .mount(&server)
        .await;

    let clone = session.clone();
    let secret = SecretString::from("hunter22");
    clone.login("kim@example.com", &secret).await.unwrap();

    assert!(session.is_authenticated());
}

// ── Guard tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_guard_admits_admin() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!({ "role": "admin", "is_admin": true }))),
        )
        .mount(&server)
        .await;

    let decision = require_admin(session.client()).await;
    assert_eq!(decision, RouteDecision::Proceed);
}

#[tokio::test]
async fn test_guard_redirects_non_admin() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!({ "role": "user", "is_admin": false }))),
        )
        .mount(&server)
        .await;

    let decision = session.require_admin().await;
    assert_eq!(decision, RouteDecision::Redirect("/".to_owned()));
}

#[tokio::test]
async fn test_guard_redirects_on_rejected_token() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "unauthorized" })))
        .mount(&server)
        .await;

    let decision = session.require_admin().await;
    assert_eq!(decision, RouteDecision::Redirect("/".to_owned()));
}

#[tokio::test]
async fn test_guard_redirects_on_server_error() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal server error"))
        .mount(&server)
        .await;

    let decision = session.require_admin().await;
    assert_eq!(decision, RouteDecision::Redirect("/".to_owned()));
}

#[tokio::test]
async fn test_guard_redirects_on_malformed_identity() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!({ "role": 7, "is_admin": "sure" }))),
        )
        .mount(&server)
        .await;

    let decision = session.require_admin().await;
    assert_eq!(decision, RouteDecision::Redirect("/".to_owned()));
}

#[tokio::test]
async fn test_guard_redirects_when_platform_unreachable() {
    // Nothing listens on port 1; the identity check fails at connect.
    let config = AppConfig {
        api_base: "http://127.0.0.1:1".to_owned(),
        timeout_secs: 1,
    };
    let session = Session::new(&config).unwrap();

    let decision = session.require_admin().await;
    assert_eq!(decision, RouteDecision::Redirect("/".to_owned()));
}
