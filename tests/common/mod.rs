#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use devcamper::devcamper_models::{CreateUserDto, Role};
use devcamper::modules::users::service::UserService;
use devcamper::router::init_router;
use devcamper::state::AppState;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }
}

/// The full router over a fresh in-memory store.
pub struct TestApp {
    pub state: AppState,
    router: axum::Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::in_memory();
        let router = init_router(state.clone());
        Self { state, router }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Registers through the API and returns the session token.
    pub async fn register(&self, email: &str, role: Role) -> String {
        let response = self
            .post(
                "/api/v1/auth/register",
                None,
                json!({
                    "name": "Test User",
                    "email": email,
                    "password": "123456",
                    "role": role.as_str(),
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["token"].as_str().unwrap().to_string()
    }

    /// Admins cannot self-register, so they are stored directly and log in.
    pub async fn admin(&self) -> String {
        let email = unique_email();
        UserService::create_user(
            self.state.store.as_ref(),
            CreateUserDto {
                name: "Admin".into(),
                email: email.clone(),
                password: "123456".into(),
                role: Some(Role::Admin),
            },
        )
        .await
        .unwrap();

        let response = self
            .post(
                "/api/v1/auth/login",
                None,
                json!({"email": email, "password": "123456"}),
            )
            .await;
        response.body["token"].as_str().unwrap().to_string()
    }

    pub async fn publisher(&self) -> String {
        self.register(&unique_email(), Role::Publisher).await
    }

    pub async fn user(&self) -> String {
        self.register(&unique_email(), Role::User).await
    }

    /// Creates a bootcamp and returns its id.
    pub async fn create_bootcamp(&self, token: &str, name: &str) -> String {
        let response = self
            .post("/api/v1/bootcamps", Some(token), bootcamp_body(name))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["id"].as_str().unwrap().to_string()
    }

    pub async fn create_course(&self, token: &str, bootcamp_id: &str, tuition: u32) -> String {
        let response = self
            .post(
                &format!("/api/v1/bootcamps/{}/courses", bootcamp_id),
                Some(token),
                json!({
                    "title": "Full Stack Web Development",
                    "description": "MERN stack",
                    "weeks": "12",
                    "tuition": tuition,
                    "minimumSkill": "intermediate",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["id"].as_str().unwrap().to_string()
    }
}

pub fn bootcamp_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "Is coding your passion? Codemasters will give you the skills you need",
        "website": "https://codemasters.com",
        "phone": "(333) 333-3333",
        "email": "enroll@codemasters.com",
        "address": "85 South Prospect Street Burlington VT 05405",
        "careers": ["Web Development", "Data Science", "Business"],
        "housing": false,
        "jobAssistance": true,
        "jobGuarantee": false,
        "acceptGi": true,
    })
}

pub fn unique_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4().simple())
}
