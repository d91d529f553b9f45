use sea_orm::EntityTrait;

use bookreview_api::domain::repository::{CommentRepository, ReviewRepository};
use bookreview_api::domain::types::{CommentChanges, NewComment, NewReview, ReviewChanges};
use bookreview_api::error::ApiError;
use bookreview_api::infra::db::{DbCommentRepository, DbReviewRepository};
use bookreview_api_schema::{comments, reviews};

use crate::helpers::TestApp;

// These writes skip the use-case existence checks, standing in for a row that
// is deleted between validation and the insert.

#[tokio::test]
async fn should_map_missing_parent_review_to_not_found() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let review = app.create_review(&alice, "T").await as i32;
    let comment = app.create_comment(&alice, review.into(), "hi").await as i32;
    let repo = DbCommentRepository { db: app.db.clone() };

    let result = repo
        .create(&NewComment {
            text: "late".into(),
            author_id: alice.user_id,
            review_id: 404,
        })
        .await;
    assert!(matches!(result, Err(ApiError::ReviewNotFound)), "{result:?}");

    let result = repo
        .update(
            comment,
            &CommentChanges {
                text: None,
                review_id: Some(404),
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::ReviewNotFound)), "{result:?}");
    assert_eq!(comments::Entity::find().all(&app.db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_report_vanished_liked_users_as_field_errors() {
    let app = TestApp::new().await;
    let alice = app.register("alice@example.com").await;
    let repo = DbReviewRepository { db: app.db.clone() };

    let result = repo
        .create(&NewReview {
            title: "T".into(),
            book_name: "B".into(),
            content: "C".into(),
            author_id: alice.user_id,
            img: None,
            liked_user_ids: vec![alice.user_id, 77],
            created_at: chrono::Utc::now(),
        })
        .await;
    let Err(ApiError::Validation(errors)) = result else {
        panic!("expected validation error, got {result:?}");
    };
    assert_eq!(
        errors.get("likedUser"),
        Some(&["Invalid pk \"77\" - object does not exist.".to_owned()][..])
    );
    assert!(reviews::Entity::find().all(&app.db).await.unwrap().is_empty());

    let review = app.create_review(&alice, "kept").await as i32;
    let result = repo
        .update(
            review,
            &ReviewChanges {
                liked_user_ids: Some(vec![78]),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))), "{result:?}");
    let kept = repo.find_by_id(review).await.unwrap().unwrap();
    assert!(kept.liked_user_ids.is_empty());
}
