mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestApp, unique_email};

#[tokio::test]
async fn test_user_admin_routes_require_admin() {
    let app = TestApp::new();

    let anonymous = app.get("/api/v1/users", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    for token in [app.user().await, app.publisher().await] {
        let response = app.get("/api/v1/users", Some(&token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);

        let response = app
            .post(
                "/api/v1/users",
                Some(&token),
                json!({"name": "X", "email": unique_email(), "password": "123456"}),
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_listing_never_exposes_passwords() {
    let app = TestApp::new();
    let admin = app.admin().await;
    app.user().await;

    let response = app.get("/api/v1/users", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], json!(2));
    for user in response.body["data"].as_array().unwrap() {
        assert!(user.get("password").is_none());
        assert!(user.get("email").is_some());
    }

    let selected = app
        .get("/api/v1/users?select=password,name", Some(&admin))
        .await;
    for user in selected.body["data"].as_array().unwrap() {
        let user = user.as_object().unwrap();
        assert!(!user.contains_key("password"));
        assert!(user.contains_key("name"));
        assert!(!user.contains_key("email"));
    }
}

#[tokio::test]
async fn test_listing_filters_by_role() {
    let app = TestApp::new();
    let admin = app.admin().await;
    app.user().await;
    app.publisher().await;
    app.publisher().await;

    let response = app
        .get("/api/v1/users?role=publisher", Some(&admin))
        .await;

    assert_eq!(response.body["count"], json!(2));
    for user in response.body["data"].as_array().unwrap() {
        assert_eq!(user["role"], json!("publisher"));
    }
}

#[tokio::test]
async fn test_admin_user_lifecycle() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let email = unique_email();

    let created = app
        .post(
            "/api/v1/users",
            Some(&admin),
            json!({
                "name": "Sara Smith",
                "email": email,
                "password": "123456",
                "role": "publisher"
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["role"], json!("publisher"));
    assert!(created.body["data"].get("password").is_none());
    let uri = format!("/api/v1/users/{}", created.body["data"]["id"].as_str().unwrap());

    let fetched = app.get(&uri, Some(&admin)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["email"], json!(email));

    let updated = app
        .put(&uri, Some(&admin), json!({"name": "Sara Jones"}))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["name"], json!("Sara Jones"));
    assert_eq!(updated.body["data"]["email"], json!(email));

    let deleted = app.delete(&uri, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body, json!({"success": true, "data": {}}));

    let gone = app.get(&uri, Some(&admin)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert!(gone.error().starts_with("User not found with id of"));
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = TestApp::new();
    let admin = app.admin().await;
    let body = json!({"name": "Sara", "email": unique_email(), "password": "123456"});

    let first = app.post("/api/v1/users", Some(&admin), body.clone()).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["data"]["role"], json!("user"));

    let second = app.post("/api/v1/users", Some(&admin), body).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.error(), "Duplicate field value entered");
}
