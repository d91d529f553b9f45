use sea_orm::DatabaseConnection;

use crate::config::JwtSettings;
use crate::infra::db::{
    DbCommentRepository, DbProfileRepository, DbReviewRepository, DbUserRepository,
};
use crate::infra::password::Argon2PasswordHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt: JwtSettings,
    pub hasher: Argon2PasswordHasher,
}

impl AppState {
    pub fn new(db: DatabaseConnection, jwt: JwtSettings) -> Self {
        Self {
            db,
            jwt,
            hasher: Argon2PasswordHasher,
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn review_repo(&self) -> DbReviewRepository {
        DbReviewRepository {
            db: self.db.clone(),
        }
    }

    pub fn comment_repo(&self) -> DbCommentRepository {
        DbCommentRepository {
            db: self.db.clone(),
        }
    }
}
