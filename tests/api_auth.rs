//! Login, token checks and role enforcement

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{TestApp, PASSWORD, STUDENT_EMAIL, TEACHER_EMAIL};

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "test");
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let app = TestApp::new();
    let (status, body) = app.send(
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": TEACHER_EMAIL, "password": PASSWORD})),
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], TEACHER_EMAIL);
    assert_eq!(body["user"]["role"], "teacher");
    assert!(body["user"].get("password_hash").is_none());

    // The issued token opens protected routes
    let token = body["token"].as_str().unwrap();
    let (status, _) = app.send(Method::GET, "/api/students", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_wrong_password_is_401() {
    let app = TestApp::new();
    let (status, body) = app.send(
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": STUDENT_EMAIL, "password": "not-the-password"})),
    ).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn login_unknown_email_is_401() {
    let app = TestApp::new();
    let (status, _) = app.send(
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@school.vps", "password": PASSWORD})),
    ).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_malformed_email_is_400() {
    let app = TestApp::new();
    let (status, _) = app.send(
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "not-an-email", "password": PASSWORD})),
    ).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_token_is_401() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api/students", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn garbage_token_is_401() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api/grades", Some("abc.def.ghi"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn student_cannot_reach_teacher_routes() {
    let app = TestApp::new();

    let (status, _) = app.send(
        Method::POST,
        "/api/students",
        app.student(),
        Some(json!({"name": "Eve", "email": "eve@school.vps", "age": 17, "study_hours": 4.0})),
    ).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(Method::GET, "/api/analytics/class-average", app.student(), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(Method::GET, "/api/predictions/risk", app.student(), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn student_can_read() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/students", app.student(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = app.send(Method::GET, "/api/grades", app.student(), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_without_password_field_is_400() {
    let app = TestApp::new();
    let (status, body) = app.send(
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": TEACHER_EMAIL})),
    ).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}
