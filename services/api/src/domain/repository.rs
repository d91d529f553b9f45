#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use crate::domain::types::{
    Comment, CommentChanges, NewComment, NewProfile, NewReview, NewUser, Profile,
    ProfileChanges, Review, ReviewChanges, User,
};
use crate::error::ApiError;

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError>;
    /// Look up by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    /// Insert a user. A duplicate email yields `ApiError::Validation` on `email`.
    async fn create(&self, user: &NewUser) -> Result<User, ApiError>;
    /// Return the subset of `ids` that belong to existing users.
    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ApiError>;
    async fn record_login(&self, id: i32, at: DateTime<Utc>) -> Result<(), ApiError>;
    /// Delete a user and everything it owns. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// Repository for profiles.
pub trait ProfileRepository: Send + Sync {
    /// All profiles, or only those of `owner_id`, ordered by id.
    async fn list(&self, owner_id: Option<i32>) -> Result<Vec<Profile>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Profile>, ApiError>;
    async fn create(&self, profile: &NewProfile) -> Result<Profile, ApiError>;
    async fn update(&self, id: i32, changes: &ProfileChanges) -> Result<Profile, ApiError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// Repository for reviews and their "liked by" sets.
pub trait ReviewRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Review>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Review>, ApiError>;
    async fn exists(&self, id: i32) -> Result<bool, ApiError>;
    async fn create(&self, review: &NewReview) -> Result<Review, ApiError>;
    async fn update(&self, id: i32, changes: &ReviewChanges) -> Result<Review, ApiError>;
    /// Delete a review with its comments and likes. Returns `true` if deleted.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// Repository for comments.
pub trait CommentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Comment>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, ApiError>;
    async fn create(&self, comment: &NewComment) -> Result<Comment, ApiError>;
    async fn update(&self, id: i32, changes: &CommentChanges) -> Result<Comment, ApiError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// Salted one-way password hashing.
///
/// Implementations are CPU-bound; use cases run them on the blocking pool, hence
/// `Clone + 'static`.
pub trait PasswordHasher: Clone + Send + Sync + 'static {
    fn hash(&self, password: &str) -> Result<String, ApiError>;
    /// `false` for a wrong password or an unparseable hash.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
