use anyhow::Context as _;

use crate::domain::repository::PasswordHasher;
use crate::error::ApiError;

pub mod comment;
pub mod profile;
pub mod review;
pub mod token;
pub mod user;

/// Hash `password` on the blocking pool so a burst of registrations does not
/// stall the async workers.
async fn hash_password<H: PasswordHasher>(
    hasher: &H,
    password: String,
) -> Result<String, ApiError> {
    let hasher = hasher.clone();
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .context("password hashing task")?
}

/// Blocking-pool counterpart of [`PasswordHasher::verify`].
async fn verify_password<H: PasswordHasher>(
    hasher: &H,
    password: String,
    hash: String,
) -> Result<bool, ApiError> {
    let hasher = hasher.clone();
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .context("password verification task")
        .map_err(ApiError::from)
}
