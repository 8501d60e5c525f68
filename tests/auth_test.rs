mod common;

use axum::http::StatusCode;
use bson::oid::ObjectId;
use serde_json::json;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;
    let unique = ObjectId::new().to_hex();

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": format!("user-{}", unique),
            "email": format!("test-{}@example.com", unique),
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "User registered successfully"
    );
    assert!(body["token"].as_str().is_some());
    assert!(body["user"]["id"].as_str().is_some());
    assert_eq!(
        body["user"]["email"].as_str().unwrap(),
        format!("test-{}@example.com", unique)
    );
    // The password hash never appears in responses
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    // Create a user first
    let auth = factory.create_user().await;

    // Try to register with the same email
    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "another-user",
            "email": auth.email,
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "User already exists");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": auth.username,
            "email": "fresh@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_empty_username() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "",
            "email": "someone@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::new().await;
    let unique = ObjectId::new().to_hex();

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": format!("user-{}", unique),
            "email": format!("test-{}@example.com", unique),
            "password": "short"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("at least 8 characters"));
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let unique = ObjectId::new().to_hex();
    let email = format!("test-{}@example.com", unique);
    let password = "password123";

    // Register first
    app.server
        .post("/api/auth/register")
        .json(&json!({
            "username": format!("user-{}", unique),
            "email": &email,
            "password": password
        }))
        .await;

    // Then login
    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({
            "email": &email,
            "password": password
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "Login successful");
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"].as_str().unwrap(), email);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({
            "email": "nonexistent@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "Invalid credentials");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    let unique = ObjectId::new().to_hex();
    let email = format!("test-{}@example.com", unique);

    app.server
        .post("/api/auth/register")
        .json(&json!({
            "username": format!("user-{}", unique),
            "email": &email,
            "password": "password123"
        }))
        .await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({
            "email": &email,
            "password": "wrongpassword"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth = factory.create_user().await;

    let response = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["user"]["email"].as_str().unwrap(), auth.email);
    assert_eq!(body["user"]["username"].as_str().unwrap(), auth.username);
}

#[tokio::test]
async fn test_me_no_token() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/auth/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_invalid_token() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", "Bearer invalid-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
