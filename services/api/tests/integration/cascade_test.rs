use axum::http::StatusCode;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

use bookreview_api::infra::db::DbUserRepository;
use bookreview_api::usecase::user::DeleteUserUseCase;
use bookreview_api_schema::{comments, profiles, review_liked_users, reviews, users};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_cascade_user_delete_to_owned_records() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let bob = app.register("bob@example.com").await;

    app.post("/profile/", &alice, json!({"nickName": "alice"})).await;
    app.post("/profile/", &bob, json!({"nickName": "bob"})).await;

    let (_, alice_review) = app
        .post(
            "/review/",
            &alice,
            json!({"title": "A", "bookName": "B", "content": "C", "likedUser": [bob.user_id]}),
        )
        .await;
    let alice_review = alice_review["id"].as_i64().unwrap();
    let bob_review = app.create_review(&bob, "bob's").await;

    // Bob comments on Alice's review; Alice comments on Bob's.
    app.create_comment(&bob, alice_review, "on alice").await;
    app.create_comment(&alice, bob_review, "by alice").await;
    app.patch(
        &format!("/review/{bob_review}/"),
        &bob,
        json!({"likedUser": [alice.user_id, bob.user_id]}),
    )
    .await;

    let usecase = DeleteUserUseCase {
        repo: DbUserRepository { db: app.db.clone() },
    };
    assert!(usecase.execute("alice@example.com").await.unwrap());

    assert!(
        users::Entity::find_by_id(alice.user_id)
            .one(&app.db)
            .await
            .unwrap()
            .is_none()
    );
    let alice_profiles = profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(alice.user_id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(alice_profiles, 0);

    let remaining_reviews: Vec<i32> = reviews::Entity::find()
        .all(&app.db)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(remaining_reviews, vec![bob_review as i32]);

    // Both comments are gone: one was on Alice's review, the other by Alice.
    assert_eq!(comments::Entity::find().count(&app.db).await.unwrap(), 0);

    let likes: Vec<(i32, i32)> = review_liked_users::Entity::find()
        .all(&app.db)
        .await
        .unwrap()
        .into_iter()
        .map(|l| (l.review_id, l.user_id))
        .collect();
    assert_eq!(likes, vec![(bob_review as i32, bob.user_id)]);

    // Bob is untouched and his token still works.
    let (status, mine) = app.get("/myprofile/", &bob).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);

    // Alice's token no longer resolves to a user.
    let (status, body) = app.get("/review/", &alice).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_cascade_review_delete_to_comments_and_likes() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let bob = app.register("bob@example.com").await;

    let (_, review) = app
        .post(
            "/review/",
            &alice,
            json!({"title": "A", "bookName": "B", "content": "C", "likedUser": [bob.user_id]}),
        )
        .await;
    let review = review["id"].as_i64().unwrap();
    let other = app.create_review(&alice, "other").await;
    app.create_comment(&bob, review, "gone").await;
    let kept = app.create_comment(&bob, other, "kept").await;

    let (status, _) = app.delete(&format!("/review/{review}/"), &alice).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = app.get("/comment/", &bob).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], kept);

    assert_eq!(
        review_liked_users::Entity::find()
            .count(&app.db)
            .await
            .unwrap(),
        0
    );
}
