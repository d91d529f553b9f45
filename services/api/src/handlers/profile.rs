use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::Profile;
use crate::error::ApiError;
use crate::handlers::extract::{ApiJson, ApiPath, CurrentUser};
use crate::state::AppState;
use crate::usecase::profile::{
    CreateProfileUseCase, DeleteProfileUseCase, GetProfileUseCase, ListProfilesUseCase,
    ProfileInput, UpdateProfileUseCase,
};

/// `userProfile` is not read from requests; the caller always owns what they create.
#[derive(Deserialize)]
pub struct ProfileRequest {
    #[serde(
        rename = "nickName",
        default,
        deserialize_with = "bookreview_core::serde::double_option"
    )]
    pub nick_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "bookreview_core::serde::double_option")]
    pub avatar: Option<Option<String>>,
}

impl From<ProfileRequest> for ProfileInput {
    fn from(body: ProfileRequest) -> Self {
        Self {
            nick_name: body.nick_name,
            avatar: body.avatar,
        }
    }
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: i32,
    #[serde(rename = "nickName")]
    pub nick_name: String,
    #[serde(rename = "userProfile")]
    pub user_profile: i32,
    #[serde(serialize_with = "bookreview_core::serde::to_ymd")]
    pub created_at: DateTime<Utc>,
    pub avatar: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            nick_name: p.nick_name,
            user_profile: p.owner_id,
            created_at: p.created_at,
            avatar: p.avatar,
        }
    }
}

fn to_responses(profiles: Vec<Profile>) -> Json<Vec<ProfileResponse>> {
    Json(profiles.into_iter().map(ProfileResponse::from).collect())
}

// ── GET /profile/ ────────────────────────────────────────────────────────────

pub async fn list_profiles(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let usecase = ListProfilesUseCase {
        repo: state.profile_repo(),
    };
    Ok(to_responses(usecase.execute(None).await?))
}

// ── GET /myprofile/ ──────────────────────────────────────────────────────────

pub async fn my_profile(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let usecase = ListProfilesUseCase {
        repo: state.profile_repo(),
    };
    Ok(to_responses(usecase.execute(Some(user.id)).await?))
}

// ── POST /profile/ ───────────────────────────────────────────────────────────

pub async fn create_profile(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProfileRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiError> {
    let usecase = CreateProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(user.id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

// ── GET /profile/{id}/ ───────────────────────────────────────────────────────

pub async fn get_profile(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let usecase = GetProfileUseCase {
        repo: state.profile_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT/PATCH /profile/{id}/ ─────────────────────────────────────────────────

async fn update_profile(
    state: AppState,
    id: i32,
    body: ProfileRequest,
    partial: bool,
) -> Result<Json<ProfileResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        repo: state.profile_repo(),
    };
    Ok(Json(usecase.execute(id, body.into(), partial).await?.into()))
}

pub async fn put_profile(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<ProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    update_profile(state, id, body, false).await
}

pub async fn patch_profile(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<ProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    update_profile(state, id, body, true).await
}

// ── DELETE /profile/{id}/ ────────────────────────────────────────────────────

pub async fn delete_profile(
    _user: CurrentUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteProfileUseCase {
        repo: state.profile_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
