use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::extract::ApiJson;
use crate::state::AppState;
use crate::usecase::user::{RegisterUserInput, RegisterUserUseCase};

// ── POST /register/ ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// The password is write-only and never echoed back.
#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: i32,
    pub email: String,
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
        hasher: state.hasher.clone(),
        superuser: false,
    };
    let user = usecase
        .execute(RegisterUserInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            email: user.email,
        }),
    ))
}
