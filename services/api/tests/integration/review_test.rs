use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_round_trip_review_with_server_fields() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;

    let (status, created) = app
        .post(
            "/review/",
            &alice,
            json!({"title": "T", "bookName": "B", "content": "C", "userReview": 999}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, fetched) = app
        .get(&format!("/review/{}/", created["id"]), &alice)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "T");
    assert_eq!(fetched["bookName"], "B");
    assert_eq!(fetched["content"], "C");
    assert_eq!(fetched["userReview"], alice.user_id);
    assert!(fetched["created_at"].as_str().is_some());
    assert_eq!(fetched["likedUser"], json!([]));
    assert_eq!(fetched["img"], Value::Null);
}

#[tokio::test]
async fn should_enforce_content_limit() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;

    let (status, body) = app
        .post(
            "/review/",
            &alice,
            json!({"title": "T", "bookName": "B", "content": "c".repeat(1001)}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["content"][0],
        "Ensure this field has no more than 1000 characters."
    );

    let (status, _) = app
        .post(
            "/review/",
            &alice,
            json!({"title": "T", "bookName": "B", "content": "c".repeat(1000)}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn should_require_text_fields() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;

    let (status, body) = app.post("/review/", &alice, json!({"title": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["title"][0], "This field may not be blank.");
    assert_eq!(body["errors"]["bookName"][0], "This field is required.");
    assert_eq!(body["errors"]["content"][0], "This field is required.");
}

#[tokio::test]
async fn should_manage_liked_users_set() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let bob = app.register("bob@example.com").await;

    let (status, created) = app
        .post(
            "/review/",
            &alice,
            json!({
                "title": "T", "bookName": "B", "content": "C",
                "likedUser": [bob.user_id, alice.user_id, bob.user_id],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["likedUser"], json!([alice.user_id, bob.user_id]));

    let uri = format!("/review/{}/", created["id"]);
    let (status, patched) = app
        .patch(&uri, &bob, json!({"likedUser": [bob.user_id]}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["likedUser"], json!([bob.user_id]));
    assert_eq!(patched["userReview"], alice.user_id);

    let (status, body) = app.patch(&uri, &bob, json!({"likedUser": [12345]})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["likedUser"][0],
        "Invalid pk \"12345\" - object does not exist."
    );

    let (_, listed) = app.get("/review/", &alice).await;
    assert_eq!(listed[0]["likedUser"], json!([bob.user_id]));
}

#[tokio::test]
async fn should_set_and_clear_review_image() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;

    let (_, created) = app
        .post(
            "/review/",
            &alice,
            json!({"title": "Dune", "bookName": "Dune", "content": "C", "img": "cover.jpg"}),
        )
        .await;
    assert_eq!(
        created["img"],
        format!("reviews/{}Dune.jpg", alice.user_id)
    );

    let uri = format!("/review/{}/", created["id"]);
    let (status, cleared) = app.patch(&uri, &alice, json!({"img": null})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["img"], Value::Null);
    assert_eq!(cleared["title"], "Dune");
}

#[tokio::test]
async fn should_list_reviews_in_id_order() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let first = app.create_review(&alice, "first").await;
    let second = app.create_review(&alice, "second").await;

    let (status, listed) = app.get("/review/", &alice).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn should_put_review_and_404_after_delete() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let id = app.create_review(&alice, "T").await;
    let uri = format!("/review/{id}/");

    let (status, put) = app
        .put(
            &uri,
            &alice,
            json!({"title": "T2", "bookName": "B2", "content": "C2"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(put["title"], "T2");

    let (status, _) = app.delete(&uri, &alice).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&uri, &alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "REVIEW_NOT_FOUND");
}

#[tokio::test]
async fn should_404_with_json_body_for_unparseable_id() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;

    let (status, body) = app.get("/review/abc/", &alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NOT_FOUND");

    let (status, body) = app.get("/profile/99999999999/", &alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NOT_FOUND");

    let (status, body) = app
        .patch("/comment/abc/", &alice, json!({"text": "x"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "NOT_FOUND");
}

#[tokio::test]
async fn should_reject_null_for_required_fields() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let id = app.create_review(&alice, "T").await;

    let (status, body) = app
        .patch(&format!("/review/{id}/"), &alice, json!({"title": null}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["title"][0], "This field may not be null.");

    let (status, body) = app
        .post(
            "/review/",
            &alice,
            json!({"title": "T", "bookName": null, "content": "C", "likedUser": null}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["bookName"][0], "This field may not be null.");
    assert_eq!(body["errors"]["likedUser"][0], "This field may not be null.");

    let (_, unchanged) = app.get(&format!("/review/{id}/"), &alice).await;
    assert_eq!(unchanged["title"], "T");
}

#[tokio::test]
async fn should_trim_text_before_storing() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;

    let (status, body) = app
        .post(
            "/review/",
            &alice,
            json!({"title": "  T  ", "bookName": " B", "content": "C\n"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["title"], "T");
    assert_eq!(body["bookName"], "B");
    assert_eq!(body["content"], "C");
}
