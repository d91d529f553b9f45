use chrono::Utc;

use bookreview_core::validation::{FieldErrors, trim_text};

use crate::domain::repository::ProfileRepository;
use crate::domain::types::{
    EMPTY_FILE, NICK_NAME_MAX_LEN, NewProfile, PROFILE_TAKEN, Profile, ProfileChanges,
    avatar_upload_path,
};
use crate::error::ApiError;

/// Writable profile fields. The outer `Option` is presence in the request and
/// the inner one is `null`. `avatar` is the original file name of the upload;
/// `Some(None)` clears it.
#[derive(Debug, Default)]
pub struct ProfileInput {
    pub nick_name: Option<Option<String>>,
    pub avatar: Option<Option<String>>,
}

impl ProfileInput {
    fn trimmed(self) -> Self {
        Self {
            nick_name: trim_text(self.nick_name),
            ..self
        }
    }
}

fn validate(input: &ProfileInput, partial: bool) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.check_text(
        "nickName",
        input.nick_name.as_ref().map(Option::as_deref),
        NICK_NAME_MAX_LEN,
        !partial,
    );
    if let Some(Some(ref file)) = input.avatar {
        if file.trim().is_empty() {
            errors.add("avatar", EMPTY_FILE);
        }
    }
    errors.into_result()
}

// ── ListProfiles ─────────────────────────────────────────────────────────────

pub struct ListProfilesUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> ListProfilesUseCase<R> {
    /// `owner_id` restricts the listing to one user's profiles.
    pub async fn execute(&self, owner_id: Option<i32>) -> Result<Vec<Profile>, ApiError> {
        self.repo.list(owner_id).await
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Profile, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ProfileNotFound)
    }
}

// ── CreateProfile ────────────────────────────────────────────────────────────

pub struct CreateProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> CreateProfileUseCase<R> {
    pub async fn execute(&self, owner_id: i32, input: ProfileInput) -> Result<Profile, ApiError> {
        let input = input.trimmed();
        validate(&input, false)?;
        if !self.repo.list(Some(owner_id)).await?.is_empty() {
            return Err(FieldErrors::single("userProfile", PROFILE_TAKEN).into());
        }
        let nick_name = input.nick_name.flatten().unwrap_or_default();
        let avatar = input
            .avatar
            .flatten()
            .map(|file| avatar_upload_path(owner_id, &nick_name, &file));
        let profile = self
            .repo
            .create(&NewProfile {
                nick_name,
                owner_id,
                avatar,
                created_at: Utc::now(),
            })
            .await?;
        tracing::info!(profile_id = profile.id, owner_id, "profile created");
        Ok(profile)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> UpdateProfileUseCase<R> {
    /// `partial` is set for PATCH; PUT must carry every required field.
    pub async fn execute(
        &self,
        id: i32,
        input: ProfileInput,
        partial: bool,
    ) -> Result<Profile, ApiError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ProfileNotFound)?;
        let input = input.trimmed();
        validate(&input, partial)?;

        let nick_name = input
            .nick_name
            .as_ref()
            .and_then(Option::as_deref)
            .unwrap_or(&existing.nick_name);
        let avatar = input.avatar.as_ref().map(|avatar| {
            avatar
                .as_deref()
                .map(|file| avatar_upload_path(existing.owner_id, nick_name, file))
        });
        let changes = ProfileChanges {
            nick_name: input.nick_name.clone().flatten(),
            avatar,
        };
        self.repo.update(id, &changes).await
    }
}

// ── DeleteProfile ────────────────────────────────────────────────────────────

pub struct DeleteProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> DeleteProfileUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::ProfileNotFound);
        }
        tracing::info!(profile_id = id, "profile deleted");
        Ok(())
    }
}
