use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn should_stamp_comment_author() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let bob = app.register("bob@example.com").await;
    let review = app.create_review(&alice, "T").await;

    let (status, body) = app
        .post(
            "/comment/",
            &bob,
            json!({"text": "great read", "review": review, "userComment": alice.user_id}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["userComment"], bob.user_id);
    assert_eq!(body["review"], review);
    assert_eq!(body["text"], "great read");
}

#[tokio::test]
async fn should_enforce_text_limit() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let review = app.create_review(&alice, "T").await;

    let (status, body) = app
        .post(
            "/comment/",
            &alice,
            json!({"text": "x".repeat(101), "review": review}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["text"][0],
        "Ensure this field has no more than 100 characters."
    );

    let (status, _) = app
        .post(
            "/comment/",
            &alice,
            json!({"text": "x".repeat(100), "review": review}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn should_404_for_unknown_parent_review() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;

    let (status, body) = app
        .post("/comment/", &alice, json!({"text": "hi", "review": 77}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "REVIEW_NOT_FOUND");
}

#[tokio::test]
async fn should_update_list_and_delete_comment() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let review = app.create_review(&alice, "T").await;
    let id = app.create_comment(&alice, review, "first").await;
    let uri = format!("/comment/{id}/");

    let (status, patched) = app.patch(&uri, &alice, json!({"text": "edited"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["text"], "edited");
    assert_eq!(patched["review"], review);

    let (status, body) = app.put(&uri, &alice, json!({"text": "no review"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["review"][0], "This field is required.");

    let (_, listed) = app.get("/comment/", &alice).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = app.delete(&uri, &alice).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&uri, &alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "COMMENT_NOT_FOUND");
}

#[tokio::test]
async fn should_trim_text_and_reject_null_review() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let review = app.create_review(&alice, "T").await;

    let (status, body) = app
        .post("/comment/", &alice, json!({"text": "  hi  ", "review": review}))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["text"], "hi");

    let (status, body) = app
        .patch(&format!("/comment/{}/", body["id"]), &alice, json!({"review": null}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["review"][0], "This field may not be null.");
}
