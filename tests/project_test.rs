mod common;

use axum::http::StatusCode;
use bson::oid::ObjectId;
use serde_json::json;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_project_success() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/projects")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "title": "Weather Dashboard",
            "description": "Live weather with hourly forecasts",
            "codeURL": "https://github.com/me/weather",
            "hostedURL": "https://weather.example.com"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Project created successfully"
    );
    assert_eq!(
        body["project"]["title"].as_str().unwrap(),
        "Weather Dashboard"
    );
    assert_eq!(
        body["project"]["owner"].as_str().unwrap(),
        auth.user_id.to_hex()
    );
    assert_eq!(
        body["project"]["codeURL"].as_str().unwrap(),
        "https://github.com/me/weather"
    );

    // The project is retrievable through the public detail endpoint
    let id = body["project"]["id"].as_str().unwrap();
    let detail = app.server.get(&format!("/api/projects/{}", id)).await;
    detail.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_create_project_requires_auth() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "title": "No Auth",
            "description": "Should be rejected"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_project_blank_title() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/projects")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "title": "   ",
            "description": "A description"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Title and description are required"
    );
}

#[tokio::test]
async fn test_create_project_missing_description() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/projects")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "title": "Only a title"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_project_duplicate_title_same_owner() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    factory.create_project(auth.user_id, "Taken Title").await;

    let response = app
        .server
        .post("/api/projects")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "title": "Taken Title",
            "description": "Second attempt"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "Title already exists");
}

#[tokio::test]
async fn test_create_project_same_title_different_owner() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let first = factory.create_user().await;
    let second = factory.create_user().await;

    factory.create_project(first.user_id, "Shared Title").await;

    // Uniqueness is scoped per owner, so another user may reuse the title
    let response = app
        .server
        .post("/api/projects")
        .add_header("Authorization", second.auth_header())
        .json(&json!({
            "title": "Shared Title",
            "description": "Different owner, same title"
        }))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_list_projects_is_public_and_global() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let first = factory.create_user().await;
    let second = factory.create_user().await;

    factory.create_project(first.user_id, "First Project").await;
    factory.create_project(second.user_id, "Second Project").await;

    // No Authorization header
    let response = app.server.get("/api/projects").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "Success");

    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 2);

    let titles: Vec<&str> = projects
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"First Project"));
    assert!(titles.contains(&"Second Project"));

    // Each element carries the joined owner document
    let first_entry = projects
        .iter()
        .find(|p| p["title"] == "First Project")
        .unwrap();
    assert_eq!(
        first_entry["user"]["username"].as_str().unwrap(),
        first.username
    );
    assert_eq!(first_entry["user"]["email"].as_str().unwrap(), first.email);
}

#[tokio::test]
async fn test_get_project_detail() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let project = factory.create_project(auth.user_id, "Detail Project").await;

    let response = app
        .server
        .get(&format!("/api/projects/{}", project.id.to_hex()))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "Success");
    assert_eq!(body["project"]["title"].as_str().unwrap(), "Detail Project");
    assert_eq!(
        body["project"]["createdByUser"]["username"].as_str().unwrap(),
        auth.username
    );

    // The detail projection drops the raw owner field and timestamps
    assert!(body["project"].get("owner").is_none());
    assert!(body["project"].get("createdAt").is_none());
}

#[tokio::test]
async fn test_get_project_unknown_id() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get(&format!("/api/projects/{}", ObjectId::new().to_hex()))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "ID is invalid");
}

#[tokio::test]
async fn test_get_project_malformed_id() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/projects/not-an-object-id").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_project_success() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let project = factory.create_project(auth.user_id, "To Update").await;

    let response = app
        .server
        .put(&format!("/api/projects/{}", project.id.to_hex()))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "description": "A fresh description",
            "likes": 42
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Project updated successfully"
    );
    assert_eq!(
        body["project"]["description"].as_str().unwrap(),
        "A fresh description"
    );
    assert_eq!(body["project"]["likes"].as_i64().unwrap(), 42);
    // Untouched fields survive the update
    assert_eq!(body["project"]["title"].as_str().unwrap(), "To Update");
}

#[tokio::test]
async fn test_update_project_title_rejected() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let project = factory.create_project(auth.user_id, "Immutable Title").await;

    let response = app
        .server
        .put(&format!("/api/projects/{}", project.id.to_hex()))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "title": "New Title",
            "description": "Also new"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "Title cannot be changed");

    // The record is untouched, description included
    let detail = app
        .server
        .get(&format!("/api/projects/{}", project.id.to_hex()))
        .await;
    let detail_body: serde_json::Value = detail.json();
    assert_eq!(
        detail_body["project"]["title"].as_str().unwrap(),
        "Immutable Title"
    );
    assert_eq!(
        detail_body["project"]["description"].as_str().unwrap(),
        "Test project description"
    );
}

#[tokio::test]
async fn test_update_project_blank_title_ignored() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let project = factory.create_project(auth.user_id, "Keeps Title").await;

    // An empty title field is treated as absent rather than as a change
    let response = app
        .server
        .put(&format!("/api/projects/{}", project.id.to_hex()))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "title": "",
            "description": "Updated around the blank title"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["project"]["title"].as_str().unwrap(), "Keeps Title");
    assert_eq!(
        body["project"]["description"].as_str().unwrap(),
        "Updated around the blank title"
    );
}

#[tokio::test]
async fn test_update_project_not_owner() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let owner = factory.create_user().await;
    let intruder = factory.create_user().await;

    let project = factory.create_project(owner.user_id, "Owned Project").await;

    let response = app
        .server
        .put(&format!("/api/projects/{}", project.id.to_hex()))
        .add_header("Authorization", intruder.auth_header())
        .json(&json!({
            "description": "Hijacked description"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "Unauthorized");

    // The failed attempt leaves the record unmodified
    let detail = app
        .server
        .get(&format!("/api/projects/{}", project.id.to_hex()))
        .await;
    let detail_body: serde_json::Value = detail.json();
    assert_eq!(
        detail_body["project"]["description"].as_str().unwrap(),
        "Test project description"
    );
}

#[tokio::test]
async fn test_update_project_unknown_id() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .put(&format!("/api/projects/{}", ObjectId::new().to_hex()))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "description": "No such project"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Project with this id does not exist"
    );
}

#[tokio::test]
async fn test_delete_project_success() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let project = factory.create_project(auth.user_id, "Doomed Project").await;

    let response = app
        .server
        .delete(&format!("/api/projects/{}", project.id.to_hex()))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Project deleted successfully"
    );

    // Gone from the detail endpoint too
    let detail = app
        .server
        .get(&format!("/api/projects/{}", project.id.to_hex()))
        .await;
    detail.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_project_not_owner() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let owner = factory.create_user().await;
    let intruder = factory.create_user().await;

    let project = factory
        .create_project(owner.user_id, "Protected Project")
        .await;

    let response = app
        .server
        .delete(&format!("/api/projects/{}", project.id.to_hex()))
        .add_header("Authorization", intruder.auth_header())
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    // Still present
    let detail = app
        .server
        .get(&format!("/api/projects/{}", project.id.to_hex()))
        .await;
    detail.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_delete_project_unknown_id() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .delete(&format!("/api/projects/{}", ObjectId::new().to_hex()))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str().unwrap(), "Project id is invalid");
}
