use axum::extract::{FromRequest, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use bookreview_auth_types::header::parse_authorization;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::token::AuthenticateUseCase;

/// JSON body whose rejections render as [`ApiError::MalformedBody`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters; an id that does not parse renders as [`ApiError::NotFound`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// The active user behind the request's access token.
///
/// 401 `NOT_AUTHENTICATED` without an `Authorization` header, 401
/// `INVALID_TOKEN` when the header or token does not check out.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    // Same shape as the other extractors: read headers synchronously, then
    // return a future that owns everything it touches.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts.headers.get(AUTHORIZATION).map(|value| {
            value
                .to_str()
                .ok()
                .and_then(parse_authorization)
                .map(str::to_owned)
        });
        let usecase = AuthenticateUseCase {
            users: state.user_repo(),
            jwt_secret: state.jwt.secret.clone(),
        };

        async move {
            let token = token
                .ok_or(ApiError::NotAuthenticated)?
                .ok_or(ApiError::InvalidToken)?;
            usecase.execute(&token).await.map(CurrentUser)
        }
    }
}
