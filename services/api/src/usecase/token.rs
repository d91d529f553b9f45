use anyhow::Context as _;
use chrono::Utc;

use bookreview_auth_types::token::{TokenType, issue_token, validate_access_token, validate_token};
use bookreview_core::validation::{FieldErrors, REQUIRED};

use crate::config::JwtSettings;
use crate::domain::repository::{PasswordHasher, UserRepository};
use crate::domain::types::{User, normalize_email};
use crate::error::ApiError;
use crate::usecase::verify_password;

fn sign(user_id: i32, token_type: TokenType, jwt: &JwtSettings) -> Result<String, ApiError> {
    let ttl = match token_type {
        TokenType::Access => jwt.access_ttl_secs,
        TokenType::Refresh => jwt.refresh_ttl_secs,
    };
    let (token, _exp) = issue_token(user_id, token_type, ttl, &jwt.secret).context("sign token")?;
    Ok(token)
}

// ── CreateToken (login) ──────────────────────────────────────────────────────

pub struct CreateTokenInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

pub struct CreateTokenUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
    pub jwt: JwtSettings,
}

impl<U: UserRepository, H: PasswordHasher> CreateTokenUseCase<U, H> {
    pub async fn execute(&self, input: CreateTokenInput) -> Result<TokenPair, ApiError> {
        let mut errors = FieldErrors::new();
        if input.email.is_none() {
            errors.add("email", REQUIRED);
        }
        if input.password.is_none() {
            errors.add("password", REQUIRED);
        }
        let (Some(email), Some(password)) = (input.email, input.password) else {
            return Err(errors.into());
        };

        let user = self
            .users
            .find_by_email(&normalize_email(&email))
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        if !user.is_active
            || !verify_password(&self.hasher, password, user.password_hash.clone()).await?
        {
            return Err(ApiError::InvalidCredentials);
        }

        self.users.record_login(user.id, Utc::now()).await?;
        tracing::debug!(user_id = user.id, "token pair issued");

        Ok(TokenPair {
            access: sign(user.id, TokenType::Access, &self.jwt)?,
            refresh: sign(user.id, TokenType::Refresh, &self.jwt)?,
        })
    }
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

pub struct RefreshTokenUseCase<U: UserRepository> {
    pub users: U,
    pub jwt: JwtSettings,
}

impl<U: UserRepository> RefreshTokenUseCase<U> {
    /// Exchange a refresh token for a new access token.
    pub async fn execute(&self, refresh: Option<String>) -> Result<String, ApiError> {
        let refresh = refresh.ok_or_else(|| FieldErrors::single("refresh", REQUIRED))?;
        let info = validate_token(&refresh, TokenType::Refresh, &self.jwt.secret)
            .map_err(|_| ApiError::InvalidToken)?;
        let user = self
            .users
            .find_by_id(info.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(ApiError::InvalidToken)?;
        sign(user.id, TokenType::Access, &self.jwt)
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> AuthenticateUseCase<U> {
    /// Resolve a bearer access token to an active user.
    pub async fn execute(&self, token: &str) -> Result<User, ApiError> {
        let info =
            validate_access_token(token, &self.jwt_secret).map_err(|_| ApiError::InvalidToken)?;
        self.users
            .find_by_id(info.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(ApiError::InvalidToken)
    }
}
