use bookreview_core::validation::FieldErrors;

use crate::domain::repository::{PasswordHasher, UserRepository};
use crate::domain::types::{
    EMAIL_MAX_LEN, EMAIL_TAKEN, INVALID_EMAIL, NewUser, PASSWORD_MAX_LEN, User, is_valid_email,
    normalize_email,
};
use crate::error::ApiError;
use crate::usecase::hash_password;

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct RegisterUserUseCase<R: UserRepository, H: PasswordHasher> {
    pub repo: R,
    pub hasher: H,
    /// Grants `is_staff` and `is_superuser` to the new account.
    pub superuser: bool,
}

impl<R: UserRepository, H: PasswordHasher> RegisterUserUseCase<R, H> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, ApiError> {
        let mut errors = FieldErrors::new();
        errors.check_text("email", input.email.as_deref().map(Some), EMAIL_MAX_LEN, true);
        errors.check_text("password", input.password.as_deref().map(Some), PASSWORD_MAX_LEN, true);

        let email = input.email.as_deref().map(normalize_email);
        if let Some(ref email) = email {
            if errors.get("email").is_none() && !is_valid_email(email) {
                errors.add("email", INVALID_EMAIL);
            }
        }
        let (Some(email), Some(password), true) = (email, input.password, errors.is_empty())
        else {
            return Err(errors.into());
        };

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(FieldErrors::single("email", EMAIL_TAKEN).into());
        }

        let password_hash = hash_password(&self.hasher, password).await?;
        let user = self
            .repo
            .create(&NewUser {
                email,
                password_hash,
                is_staff: self.superuser,
                is_superuser: self.superuser,
            })
            .await?;
        tracing::info!(user_id = user.id, superuser = self.superuser, "user registered");
        Ok(user)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    /// Returns `false` when no account has this email.
    pub async fn execute(&self, email: &str) -> Result<bool, ApiError> {
        let Some(user) = self.repo.find_by_email(&normalize_email(email)).await? else {
            return Ok(false);
        };
        let deleted = self.repo.delete(user.id).await?;
        tracing::info!(user_id = user.id, "user deleted with owned records");
        Ok(deleted)
    }
}
