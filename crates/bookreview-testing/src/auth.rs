//! Mock auth helpers for integration tests.
//!
//! Protected routes expect `Authorization: Bearer <access token>`. `MockAuth`
//! signs a real access token with [`TEST_JWT_SECRET`] so tests can act as any
//! user id without going through the login endpoint.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};

use bookreview_auth_types::token::{TokenType, issue_token};

/// Secret shared by test app state and `MockAuth`.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Identity injected into test requests.
pub struct MockAuth {
    pub user_id: i32,
}

impl MockAuth {
    pub fn new(user_id: i32) -> Self {
        Self { user_id }
    }

    /// A signed access token for this user.
    pub fn access_token(&self) -> String {
        issue_token(self.user_id, TokenType::Access, 300, TEST_JWT_SECRET)
            .expect("sign test token")
            .0
    }

    /// A signed refresh token for this user.
    pub fn refresh_token(&self) -> String {
        issue_token(self.user_id, TokenType::Refresh, 300, TEST_JWT_SECRET)
            .expect("sign test token")
            .0
    }

    /// Return headers as a logged-in client would send them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.access_token()))
                .expect("valid header value"),
        );
        map
    }
}
