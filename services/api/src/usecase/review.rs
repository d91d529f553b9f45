use std::collections::BTreeSet;

use chrono::Utc;

use bookreview_core::validation::{FieldErrors, NULL, trim_text};

use crate::domain::repository::{ReviewRepository, UserRepository};
use crate::domain::types::{
    BOOK_NAME_MAX_LEN, CONTENT_MAX_LEN, EMPTY_FILE, NewReview, Review, ReviewChanges,
    TITLE_MAX_LEN, review_upload_path, unknown_pk,
};
use crate::error::ApiError;

/// Writable review fields. The outer `Option` is presence in the request and
/// the inner one is `null`. `img` is the original file name of the upload;
/// `Some(None)` clears it. `liked_user_ids` replaces the whole set.
#[derive(Debug, Default)]
pub struct ReviewInput {
    pub title: Option<Option<String>>,
    pub book_name: Option<Option<String>>,
    pub content: Option<Option<String>>,
    pub img: Option<Option<String>>,
    pub liked_user_ids: Option<Option<Vec<i32>>>,
}

impl ReviewInput {
    fn trimmed(self) -> Self {
        Self {
            title: trim_text(self.title),
            book_name: trim_text(self.book_name),
            content: trim_text(self.content),
            ..self
        }
    }
}

/// Validate `input` and return the deduplicated, ascending liked-by set.
async fn validate<U: UserRepository>(
    users: &U,
    input: &ReviewInput,
    partial: bool,
) -> Result<Option<Vec<i32>>, ApiError> {
    let mut errors = FieldErrors::new();
    let text = [
        ("title", &input.title, TITLE_MAX_LEN),
        ("bookName", &input.book_name, BOOK_NAME_MAX_LEN),
        ("content", &input.content, CONTENT_MAX_LEN),
    ];
    for (field, value, max_chars) in text {
        errors.check_text(field, value.as_ref().map(Option::as_deref), max_chars, !partial);
    }
    if let Some(Some(ref file)) = input.img {
        if file.trim().is_empty() {
            errors.add("img", EMPTY_FILE);
        }
    }

    let liked = match input.liked_user_ids {
        Some(None) => {
            errors.add("likedUser", NULL);
            None
        }
        Some(Some(ref ids)) => {
            let ids: Vec<i32> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
            let existing: BTreeSet<i32> = users.existing_ids(&ids).await?.into_iter().collect();
            for id in ids.iter().filter(|id| !existing.contains(id)) {
                errors.add("likedUser", unknown_pk(*id));
            }
            Some(ids)
        }
        None => None,
    };

    errors.into_result()?;
    Ok(liked)
}

// ── ListReviews ──────────────────────────────────────────────────────────────

pub struct ListReviewsUseCase<R: ReviewRepository> {
    pub repo: R,
}

impl<R: ReviewRepository> ListReviewsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Review>, ApiError> {
        self.repo.list().await
    }
}

// ── GetReview ────────────────────────────────────────────────────────────────

pub struct GetReviewUseCase<R: ReviewRepository> {
    pub repo: R,
}

impl<R: ReviewRepository> GetReviewUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Review, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ReviewNotFound)
    }
}

// ── CreateReview ─────────────────────────────────────────────────────────────

pub struct CreateReviewUseCase<R: ReviewRepository, U: UserRepository> {
    pub repo: R,
    pub users: U,
}

impl<R: ReviewRepository, U: UserRepository> CreateReviewUseCase<R, U> {
    pub async fn execute(&self, author_id: i32, input: ReviewInput) -> Result<Review, ApiError> {
        let input = input.trimmed();
        let liked_user_ids = validate(&self.users, &input, false)
            .await?
            .unwrap_or_default();
        let title = input.title.flatten().unwrap_or_default();
        let img = input
            .img
            .flatten()
            .map(|file| review_upload_path(author_id, &title, &file));
        let review = self
            .repo
            .create(&NewReview {
                title,
                book_name: input.book_name.flatten().unwrap_or_default(),
                content: input.content.flatten().unwrap_or_default(),
                author_id,
                img,
                liked_user_ids,
                created_at: Utc::now(),
            })
            .await?;
        tracing::info!(review_id = review.id, author_id, "review created");
        Ok(review)
    }
}

// ── UpdateReview ─────────────────────────────────────────────────────────────

pub struct UpdateReviewUseCase<R: ReviewRepository, U: UserRepository> {
    pub repo: R,
    pub users: U,
}

impl<R: ReviewRepository, U: UserRepository> UpdateReviewUseCase<R, U> {
    /// `partial` is set for PATCH; PUT must carry every required field.
    pub async fn execute(
        &self,
        id: i32,
        input: ReviewInput,
        partial: bool,
    ) -> Result<Review, ApiError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ReviewNotFound)?;
        let input = input.trimmed();
        let liked_user_ids = validate(&self.users, &input, partial).await?;

        let title = input
            .title
            .as_ref()
            .and_then(Option::as_deref)
            .unwrap_or(&existing.title);
        let img = input.img.as_ref().map(|img| {
            img.as_deref()
                .map(|file| review_upload_path(existing.author_id, title, file))
        });
        let changes = ReviewChanges {
            title: input.title.clone().flatten(),
            book_name: input.book_name.flatten(),
            content: input.content.flatten(),
            img,
            liked_user_ids,
        };
        self.repo.update(id, &changes).await
    }
}

// ── DeleteReview ─────────────────────────────────────────────────────────────

pub struct DeleteReviewUseCase<R: ReviewRepository> {
    pub repo: R,
}

impl<R: ReviewRepository> DeleteReviewUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::ReviewNotFound);
        }
        tracing::info!(review_id = id, "review deleted with comments");
        Ok(())
    }
}
