use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::Review;
use crate::error::ApiError;
use crate::handlers::extract::{ApiJson, ApiPath, CurrentUser};
use crate::state::AppState;
use crate::usecase::review::{
    CreateReviewUseCase, DeleteReviewUseCase, GetReviewUseCase, ListReviewsUseCase, ReviewInput,
    UpdateReviewUseCase,
};

#[derive(Deserialize)]
pub struct ReviewRequest {
    #[serde(default, deserialize_with = "bookreview_core::serde::double_option")]
    pub title: Option<Option<String>>,
    #[serde(
        rename = "bookName",
        default,
        deserialize_with = "bookreview_core::serde::double_option"
    )]
    pub book_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "bookreview_core::serde::double_option")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "bookreview_core::serde::double_option")]
    pub img: Option<Option<String>>,
    #[serde(
        rename = "likedUser",
        default,
        deserialize_with = "bookreview_core::serde::double_option"
    )]
    pub liked_user: Option<Option<Vec<i32>>>,
}

impl From<ReviewRequest> for ReviewInput {
    fn from(body: ReviewRequest) -> Self {
        Self {
            title: body.title,
            book_name: body.book_name,
            content: body.content,
            img: body.img,
            liked_user_ids: body.liked_user,
        }
    }
}

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: i32,
    pub title: String,
    #[serde(rename = "bookName")]
    pub book_name: String,
    pub content: String,
    #[serde(rename = "userReview")]
    pub user_review: i32,
    #[serde(serialize_with = "bookreview_core::serde::to_ymd")]
    pub created_at: DateTime<Utc>,
    pub img: Option<String>,
    #[serde(rename = "likedUser")]
    pub liked_user: Vec<i32>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            title: r.title,
            book_name: r.book_name,
            content: r.content,
            user_review: r.author_id,
            created_at: r.created_at,
            img: r.img,
            liked_user: r.liked_user_ids,
        }
    }
}

// ── GET /review/ ─────────────────────────────────────────────────────────────

pub async fn list_reviews(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let usecase = ListReviewsUseCase {
        repo: state.review_repo(),
    };
    let reviews = usecase.execute().await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

// ── POST /review/ ────────────────────────────────────────────────────────────

pub async fn create_review(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let usecase = CreateReviewUseCase {
        repo: state.review_repo(),
        users: state.user_repo(),
    };
    let review = usecase.execute(user.id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

// ── GET /review/{id}/ ────────────────────────────────────────────────────────

pub async fn get_review(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let usecase = GetReviewUseCase {
        repo: state.review_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT/PATCH /review/{id}/ ──────────────────────────────────────────────────

async fn update_review(
    state: AppState,
    id: i32,
    body: ReviewRequest,
    partial: bool,
) -> Result<Json<ReviewResponse>, ApiError> {
    let usecase = UpdateReviewUseCase {
        repo: state.review_repo(),
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(id, body.into(), partial).await?.into()))
}

pub async fn put_review(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    update_review(state, id, body, false).await
}

pub async fn patch_review(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    update_review(state, id, body, true).await
}

// ── DELETE /review/{id}/ ─────────────────────────────────────────────────────

pub async fn delete_review(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteReviewUseCase {
        repo: state.review_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
