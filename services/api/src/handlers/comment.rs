use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::types::Comment;
use crate::error::ApiError;
use crate::handlers::extract::{ApiJson, ApiPath, CurrentUser};
use crate::state::AppState;
use crate::usecase::comment::{
    CommentInput, CreateCommentUseCase, DeleteCommentUseCase, GetCommentUseCase,
    ListCommentsUseCase, UpdateCommentUseCase,
};

#[derive(Deserialize)]
pub struct CommentRequest {
    #[serde(default, deserialize_with = "bookreview_core::serde::double_option")]
    pub text: Option<Option<String>>,
    #[serde(default, deserialize_with = "bookreview_core::serde::double_option")]
    pub review: Option<Option<i32>>,
}

impl From<CommentRequest> for CommentInput {
    fn from(body: CommentRequest) -> Self {
        Self {
            text: body.text,
            review_id: body.review,
        }
    }
}

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: i32,
    pub text: String,
    #[serde(rename = "userComment")]
    pub user_comment: i32,
    pub review: i32,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            text: c.text,
            user_comment: c.author_id,
            review: c.review_id,
        }
    }
}

// ── GET /comment/ ────────────────────────────────────────────────────────────

pub async fn list_comments(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let usecase = ListCommentsUseCase {
        repo: state.comment_repo(),
    };
    let comments = usecase.execute().await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

// ── POST /comment/ ───────────────────────────────────────────────────────────

pub async fn create_comment(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let usecase = CreateCommentUseCase {
        repo: state.comment_repo(),
        reviews: state.review_repo(),
    };
    let comment = usecase.execute(user.id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

// ── GET /comment/{id}/ ───────────────────────────────────────────────────────

pub async fn get_comment(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<CommentResponse>, ApiError> {
    let usecase = GetCommentUseCase {
        repo: state.comment_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT/PATCH /comment/{id}/ ─────────────────────────────────────────────────

async fn update_comment(
    state: AppState,
    id: i32,
    body: CommentRequest,
    partial: bool,
) -> Result<Json<CommentResponse>, ApiError> {
    let usecase = UpdateCommentUseCase {
        repo: state.comment_repo(),
        reviews: state.review_repo(),
    };
    Ok(Json(usecase.execute(id, body.into(), partial).await?.into()))
}

pub async fn put_comment(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<CommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    update_comment(state, id, body, false).await
}

pub async fn patch_comment(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<CommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    update_comment(state, id, body, true).await
}

// ── DELETE /comment/{id}/ ────────────────────────────────────────────────────

pub async fn delete_comment(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteCommentUseCase {
        repo: state.comment_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
