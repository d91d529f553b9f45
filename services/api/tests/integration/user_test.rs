use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

use bookreview_api_schema::users;
use bookreview_testing::MockAuth;

use crate::helpers::{TEST_PASSWORD, TestApp};

// ── POST /register/ ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_with_lowercased_email_and_hidden_password() {
    let app = TestApp::new().await;
    let (status, body) = app
        .call(
            Method::POST,
            "/register/",
            None,
            Some(json!({"email": "Alice@Example.COM", "password": TEST_PASSWORD})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password").is_none());

    let stored = users::Entity::find()
        .filter(users::Column::Email.eq("alice@example.com"))
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id as i64, body["id"].as_i64().unwrap());
    assert!(stored.password.starts_with("$argon2id$"));
    assert!(stored.is_active && !stored.is_staff && !stored.is_superuser);
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let app = TestApp::new().await;
    app.register("alice@example.com").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/register/",
            None,
            Some(json!({"email": "ALICE@example.com", "password": "other"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "VALIDATION_FAILED");
    assert_eq!(body["errors"]["email"][0], "user with this email already exists.");
}

#[tokio::test]
async fn should_reject_missing_and_malformed_fields() {
    let app = TestApp::new().await;
    let (status, body) = app
        .call(
            Method::POST,
            "/register/",
            None,
            Some(json!({"email": "nope"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["email"][0], "Enter a valid email address.");
    assert_eq!(body["errors"]["password"][0], "This field is required.");
}

#[tokio::test]
async fn should_reject_undecodable_body() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/register/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "MALFORMED_BODY");
}

// ── POST /authen/jwt/create/ ─────────────────────────────────────────────────

#[tokio::test]
async fn should_log_in_and_use_access_token() {
    let app = TestApp::new().await;
    app.register("alice@example.com").await;

    let (status, tokens) = app
        .call(
            Method::POST,
            "/authen/jwt/create/",
            None,
            Some(json!({"email": "alice@example.com", "password": TEST_PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let access = tokens["access"].as_str().unwrap();
    assert!(tokens["refresh"].as_str().is_some());

    let request = Request::builder()
        .uri("/myprofile/")
        .header(header::AUTHORIZATION, format!("JWT {access}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let stored = users::Entity::find()
        .filter(users::Column::Email.eq("alice@example.com"))
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.last_login.is_some());
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let app = TestApp::new().await;
    app.register("alice@example.com").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/authen/jwt/create/",
            None,
            Some(json!({"email": "alice@example.com", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "INVALID_CREDENTIALS");
}

// ── POST /authen/jwt/refresh/ ────────────────────────────────────────────────

#[tokio::test]
async fn should_refresh_only_with_refresh_token() {
    let app = TestApp::new().await;
    let auth = app.register("alice@example.com").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/authen/jwt/refresh/",
            None,
            Some(json!({"refresh": auth.refresh_token()})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].as_str().is_some());

    let (status, body) = app
        .call(
            Method::POST,
            "/authen/jwt/refresh/",
            None,
            Some(json!({"refresh": auth.access_token()})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "INVALID_TOKEN");
}

// ── Authentication on protected routes ───────────────────────────────────────

#[tokio::test]
async fn should_require_token_on_protected_routes() {
    let app = TestApp::new().await;
    for uri in ["/profile/", "/myprofile/", "/review/", "/comment/"] {
        let (status, body) = app.call(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["kind"], "NOT_AUTHENTICATED", "{uri}");
    }
}

#[tokio::test]
async fn should_reject_refresh_token_as_bearer() {
    let app = TestApp::new().await;
    let auth = app.register("alice@example.com").await;
    let request = Request::builder()
        .uri("/review/")
        .header(header::AUTHORIZATION, format!("Bearer {}", auth.refresh_token()))
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_reject_token_of_unknown_user() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/review/", &MockAuth::new(404)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "INVALID_TOKEN");
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_live_and_ready() {
    let app = TestApp::new().await;
    for uri in ["/healthz", "/readyz"] {
        let (status, _) = app.call(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn should_echo_request_id() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();
    let resp = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}
