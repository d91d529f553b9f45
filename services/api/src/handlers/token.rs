use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::extract::ApiJson;
use crate::state::AppState;
use crate::usecase::token::{CreateTokenInput, CreateTokenUseCase, RefreshTokenUseCase};

// ── POST /authen/jwt/create/ ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTokenRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

pub async fn create_token(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateTokenRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let usecase = CreateTokenUseCase {
        users: state.user_repo(),
        hasher: state.hasher.clone(),
        jwt: state.jwt.clone(),
    };
    let pair = usecase
        .execute(CreateTokenInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

// ── POST /authen/jwt/refresh/ ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh: Option<String>,
}

#[derive(Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RefreshTokenRequest>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        jwt: state.jwt.clone(),
    };
    let access = usecase.execute(body.refresh).await?;
    Ok(Json(AccessTokenResponse { access }))
}
