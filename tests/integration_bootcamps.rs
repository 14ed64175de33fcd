mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{TestApp, bootcamp_body};

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap().to_string())
        .collect()
}

/// Thirty bootcamps owned by one admin; every third one offers housing.
async fn thirty_bootcamps(app: &TestApp) -> String {
    let admin = app.admin().await;
    for i in 0..30 {
        let mut body = bootcamp_body(&format!("Bootcamp {:02}", i));
        body["housing"] = json!(i % 3 == 0);
        let response = app.post("/api/v1/bootcamps", Some(&admin), body).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    }
    admin
}

#[tokio::test]
async fn test_pagination_over_thirty_bootcamps() {
    let app = TestApp::new();
    thirty_bootcamps(&app).await;

    let first = app.get("/api/v1/bootcamps?limit=10", None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["count"], json!(10));
    assert_eq!(
        first.body["pagination"],
        json!({"next": {"page": 2, "limit": 10}})
    );

    let second = app.get("/api/v1/bootcamps?page=2&limit=10", None).await;
    assert_eq!(
        second.body["pagination"],
        json!({"next": {"page": 3, "limit": 10}, "prev": {"page": 1, "limit": 10}})
    );

    let third = app.get("/api/v1/bootcamps?page=3&limit=10", None).await;
    assert_eq!(
        third.body["pagination"],
        json!({"prev": {"page": 2, "limit": 10}})
    );

    let mut all = names(&first.body);
    all.extend(names(&second.body));
    all.extend(names(&third.body));
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 30);
}

#[tokio::test]
async fn test_default_page_size_is_twenty_five() {
    let app = TestApp::new();
    thirty_bootcamps(&app).await;

    let response = app.get("/api/v1/bootcamps", None).await;
    assert_eq!(response.body["count"], json!(25));
    assert_eq!(
        response.body["pagination"],
        json!({"next": {"page": 2, "limit": 25}})
    );
}

#[tokio::test]
async fn test_pagination_uses_filtered_count() {
    let app = TestApp::new();
    thirty_bootcamps(&app).await;

    let first = app.get("/api/v1/bootcamps?housing=true&limit=5", None).await;
    assert_eq!(first.body["count"], json!(5));
    assert_eq!(
        first.body["pagination"],
        json!({"next": {"page": 2, "limit": 5}})
    );

    let second = app
        .get("/api/v1/bootcamps?housing=true&limit=5&page=2", None)
        .await;
    assert_eq!(second.body["count"], json!(5));
    assert_eq!(
        second.body["pagination"],
        json!({"prev": {"page": 1, "limit": 5}})
    );
    for bootcamp in second.body["data"].as_array().unwrap() {
        assert_eq!(bootcamp["housing"], json!(true));
    }
}

#[tokio::test]
async fn test_default_sort_is_newest_first() {
    let app = TestApp::new();
    for (name, at) in [
        ("Oldest", "2024-01-01T00:00:00.000Z"),
        ("Newest", "2024-03-01T00:00:00.000Z"),
        ("Middle", "2024-02-01T00:00:00.000Z"),
    ] {
        let doc = json!({"name": name, "createdAt": at});
        app.state
            .store
            .insert("bootcamps", doc.as_object().cloned().unwrap())
            .await
            .unwrap();
    }

    let response = app.get("/api/v1/bootcamps", None).await;
    assert_eq!(names(&response.body), vec!["Newest", "Middle", "Oldest"]);

    let response = app.get("/api/v1/bootcamps?sort=name", None).await;
    assert_eq!(names(&response.body), vec!["Middle", "Newest", "Oldest"]);

    let response = app.get("/api/v1/bootcamps?sort=-name", None).await;
    assert_eq!(names(&response.body), vec!["Oldest", "Newest", "Middle"]);
}

#[tokio::test]
async fn test_multiple_sort_keys() {
    let app = TestApp::new();
    for (name, cost) in [("Alpha", 9000), ("Bravo", 12000), ("Charlie", 9000), ("Delta", 12000)] {
        let doc = json!({"name": name, "averageCost": cost});
        app.state
            .store
            .insert("bootcamps", doc.as_object().cloned().unwrap())
            .await
            .unwrap();
    }

    let response = app
        .get("/api/v1/bootcamps?sort=-averageCost,name", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        names(&response.body),
        vec!["Bravo", "Delta", "Alpha", "Charlie"]
    );

    let response = app
        .get("/api/v1/bootcamps?sort=averageCost,-name", None)
        .await;
    assert_eq!(
        names(&response.body),
        vec!["Charlie", "Alpha", "Delta", "Bravo"]
    );
}

#[tokio::test]
async fn test_select_restricts_fields() {
    let app = TestApp::new();
    let publisher = app.publisher().await;
    app.create_bootcamp(&publisher, "Devworks Bootcamp").await;

    let response = app
        .get("/api/v1/bootcamps?select=name,housing", None)
        .await;

    let bootcamp = response.body["data"][0].as_object().unwrap();
    assert_eq!(bootcamp["name"], json!("Devworks Bootcamp"));
    assert!(bootcamp.contains_key("id"));
    assert!(bootcamp.contains_key("housing"));
    assert!(!bootcamp.contains_key("description"));
    assert!(!bootcamp.contains_key("address"));
}

#[tokio::test]
async fn test_comparison_operators_on_average_cost() {
    let app = TestApp::new();
    let cheap_owner = app.publisher().await;
    let cheap = app.create_bootcamp(&cheap_owner, "Cheap Camp").await;
    app.create_course(&cheap_owner, &cheap, 8000).await;

    let pricey_owner = app.publisher().await;
    let pricey = app.create_bootcamp(&pricey_owner, "Pricey Camp").await;
    app.create_course(&pricey_owner, &pricey, 15000).await;

    let response = app
        .get("/api/v1/bootcamps?averageCost%5Blte%5D=10000", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.body), vec!["Cheap Camp"]);

    let response = app
        .get("/api/v1/bootcamps?averageCost%5Bgt%5D=10000", None)
        .await;
    assert_eq!(names(&response.body), vec!["Pricey Camp"]);

    let response = app
        .get(
            "/api/v1/bootcamps?name%5Bin%5D=Cheap%20Camp&name%5Bin%5D=Pricey%20Camp&sort=averageCost",
            None,
        )
        .await;
    assert_eq!(names(&response.body), vec!["Cheap Camp", "Pricey Camp"]);
}

#[tokio::test]
async fn test_listing_embeds_courses() {
    let app = TestApp::new();
    let publisher = app.publisher().await;
    let bootcamp = app.create_bootcamp(&publisher, "Devworks Bootcamp").await;
    app.create_course(&publisher, &bootcamp, 10000).await;

    let response = app.get("/api/v1/bootcamps", None).await;

    let courses = response.body["data"][0]["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["bootcamp"], json!(bootcamp));
    assert_eq!(response.body["data"][0]["averageCost"], json!(10000.0));
}

#[tokio::test]
async fn test_identical_listing_is_idempotent() {
    let app = TestApp::new();
    thirty_bootcamps(&app).await;

    let uri = "/api/v1/bootcamps?housing=false&select=name,housing&sort=name&page=2&limit=7";
    let first = app.get(uri, None).await;
    let second = app.get(uri, None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_malformed_filter_is_bad_request() {
    let app = TestApp::new();

    let unknown = app.get("/api/v1/bootcamps?averageCost%5Bnear%5D=1", None).await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.body["success"], json!(false));

    let unbalanced = app.get("/api/v1/bootcamps?averageCost%5Blte=1", None).await;
    assert_eq!(unbalanced.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_bootcamp_not_found() {
    let app = TestApp::new();

    let malformed = app.get("/api/v1/bootcamps/not-an-id", None).await;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);
    assert_eq!(malformed.error(), "Resource not found with id of not-an-id");

    let id = uuid::Uuid::new_v4();
    let missing = app.get(&format!("/api/v1/bootcamps/{}", id), None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error(), format!("Bootcamp not found with id of {}", id));
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let app = TestApp::new();

    let response = app
        .post("/api/v1/bootcamps", None, bootcamp_body("Devworks"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_role_cannot_create_and_nothing_is_written() {
    let app = TestApp::new();
    let user = app.user().await;

    let response = app
        .post("/api/v1/bootcamps", Some(&user), bootcamp_body("Devworks"))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.error(),
        "User role user is not authorized to access this route"
    );

    let listing = app.get("/api/v1/bootcamps", None).await;
    assert_eq!(listing.body["count"], json!(0));
}

#[tokio::test]
async fn test_create_derives_slug_and_owner() {
    let app = TestApp::new();
    let publisher = app.publisher().await;
    let me = app.get("/api/v1/auth/me", Some(&publisher)).await;

    let response = app
        .post(
            "/api/v1/bootcamps",
            Some(&publisher),
            bootcamp_body("ModernTech Bootcamp"),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["slug"], json!("moderntech-bootcamp"));
    assert_eq!(data["user"], me.body["data"]["id"]);
    assert_eq!(data["photo"], json!("no-photo.jpg"));
}

#[tokio::test]
async fn test_publisher_may_publish_one_bootcamp() {
    let app = TestApp::new();
    let publisher = app.publisher().await;
    app.create_bootcamp(&publisher, "First").await;

    let response = app
        .post("/api/v1/bootcamps", Some(&publisher), bootcamp_body("Second"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error().contains("has already published a bootcamp"));
}

#[tokio::test]
async fn test_duplicate_name_is_rejected() {
    let app = TestApp::new();
    let admin = app.admin().await;
    app.create_bootcamp(&admin, "Devworks").await;

    let response = app
        .post("/api/v1/bootcamps", Some(&admin), bootcamp_body("Devworks"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Duplicate field value entered");
}

#[tokio::test]
async fn test_validation_failure_is_bad_request() {
    let app = TestApp::new();
    let publisher = app.publisher().await;

    let mut body = bootcamp_body(&"x".repeat(51));
    body["careers"] = json!([]);
    let response = app.post("/api/v1/bootcamps", Some(&publisher), body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error().contains("Name cannot be more than 50 characters"));
}

#[tokio::test]
async fn test_non_owner_cannot_update_or_delete() {
    let app = TestApp::new();
    let owner = app.publisher().await;
    let id = app.create_bootcamp(&owner, "Devworks").await;
    let other = app.publisher().await;
    let uri = format!("/api/v1/bootcamps/{}", id);

    let update = app.put(&uri, Some(&other), json!({"name": "Hijacked"})).await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);
    let delete = app.delete(&uri, Some(&other)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let current = app.get(&uri, None).await;
    assert_eq!(current.body["data"]["name"], json!("Devworks"));

    let update = app.put(&uri, Some(&owner), json!({"name": "Devcentral"})).await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["data"]["slug"], json!("devcentral"));

    let admin = app.admin().await;
    let update = app.put(&uri, Some(&admin), json!({"housing": true})).await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["data"]["housing"], json!(true));
}

#[tokio::test]
async fn test_delete_cascades_to_courses_and_reviews() {
    let app = TestApp::new();
    let owner = app.publisher().await;
    let id = app.create_bootcamp(&owner, "Devworks").await;
    app.create_course(&owner, &id, 10000).await;
    let reviewer = app.user().await;
    let review = app
        .post(
            &format!("/api/v1/bootcamps/{}/reviews", id),
            Some(&reviewer),
            json!({"title": "Great", "text": "Learned a lot", "rating": 9}),
        )
        .await;
    assert_eq!(review.status, StatusCode::CREATED);

    let response = app
        .delete(&format!("/api/v1/bootcamps/{}", id), Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"success": true, "data": {}}));

    let courses = app.get("/api/v1/courses", None).await;
    assert_eq!(courses.body["count"], json!(0));
    let reviews = app.get("/api/v1/reviews", None).await;
    assert_eq!(reviews.body["count"], json!(0));
}
