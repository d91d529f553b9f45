use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt;

use bookreview_api::config::JwtSettings;
use bookreview_api::router::build_router;
use bookreview_api::state::AppState;
use bookreview_api_migration::{Migrator, MigratorTrait};
use bookreview_testing::{MockAuth, TEST_JWT_SECRET};

// ── TestApp ──────────────────────────────────────────────────────────────────

/// Router over a fresh, migrated in-memory SQLite database.
pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let state = AppState::new(db.clone(), JwtSettings::new(TEST_JWT_SECRET));
        Self {
            router: build_router(state),
            db,
        }
    }

    /// Send a request and return the status with the decoded JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        auth: Option<&MockAuth>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            for (name, value) in auth.headers().iter() {
                builder = builder.header(name, value);
            }
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, auth: &MockAuth) -> (StatusCode, Value) {
        self.call(Method::GET, uri, Some(auth), None).await
    }

    pub async fn post(&self, uri: &str, auth: &MockAuth, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(auth), Some(body)).await
    }

    pub async fn put(&self, uri: &str, auth: &MockAuth, body: Value) -> (StatusCode, Value) {
        self.call(Method::PUT, uri, Some(auth), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, auth: &MockAuth, body: Value) -> (StatusCode, Value) {
        self.call(Method::PATCH, uri, Some(auth), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, auth: &MockAuth) -> (StatusCode, Value) {
        self.call(Method::DELETE, uri, Some(auth), None).await
    }

    /// Register an account and return a `MockAuth` acting as it.
    pub async fn register(&self, email: &str) -> MockAuth {
        let (status, body) = self
            .call(
                Method::POST,
                "/register/",
                None,
                Some(json!({"email": email, "password": TEST_PASSWORD})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        MockAuth::new(body["id"].as_i64().unwrap() as i32)
    }

    pub async fn create_review(&self, auth: &MockAuth, title: &str) -> i64 {
        let (status, body) = self
            .post(
                "/review/",
                auth,
                json!({"title": title, "bookName": "B", "content": "C"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn create_comment(&self, auth: &MockAuth, review_id: i64, text: &str) -> i64 {
        let (status, body) = self
            .post("/comment/", auth, json!({"text": text, "review": review_id}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

pub const TEST_PASSWORD: &str = "correct-horse-battery";
