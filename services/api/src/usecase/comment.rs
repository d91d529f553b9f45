use bookreview_core::validation::{FieldErrors, NULL, REQUIRED, trim_text};

use crate::domain::repository::{CommentRepository, ReviewRepository};
use crate::domain::types::{COMMENT_TEXT_MAX_LEN, Comment, CommentChanges, NewComment};
use crate::error::ApiError;

/// Writable comment fields. The outer `Option` is presence in the request and
/// the inner one is `null`.
#[derive(Debug, Default)]
pub struct CommentInput {
    pub text: Option<Option<String>>,
    /// Parent review id.
    pub review_id: Option<Option<i32>>,
}

impl CommentInput {
    fn trimmed(self) -> Self {
        Self {
            text: trim_text(self.text),
            ..self
        }
    }
}

fn validate(input: &CommentInput, partial: bool) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.check_text(
        "text",
        input.text.as_ref().map(Option::as_deref),
        COMMENT_TEXT_MAX_LEN,
        !partial,
    );
    match input.review_id {
        None if !partial => errors.add("review", REQUIRED),
        Some(None) => errors.add("review", NULL),
        _ => {}
    }
    errors.into_result()
}

/// A comment may only point at an existing review.
async fn ensure_review<R: ReviewRepository>(reviews: &R, review_id: i32) -> Result<(), ApiError> {
    if reviews.exists(review_id).await? {
        Ok(())
    } else {
        Err(ApiError::ReviewNotFound)
    }
}

// ── ListComments ─────────────────────────────────────────────────────────────

pub struct ListCommentsUseCase<C: CommentRepository> {
    pub repo: C,
}

impl<C: CommentRepository> ListCommentsUseCase<C> {
    pub async fn execute(&self) -> Result<Vec<Comment>, ApiError> {
        self.repo.list().await
    }
}

// ── GetComment ───────────────────────────────────────────────────────────────

pub struct GetCommentUseCase<C: CommentRepository> {
    pub repo: C,
}

impl<C: CommentRepository> GetCommentUseCase<C> {
    pub async fn execute(&self, id: i32) -> Result<Comment, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CommentNotFound)
    }
}

// ── CreateComment ────────────────────────────────────────────────────────────

pub struct CreateCommentUseCase<C: CommentRepository, R: ReviewRepository> {
    pub repo: C,
    pub reviews: R,
}

impl<C: CommentRepository, R: ReviewRepository> CreateCommentUseCase<C, R> {
    pub async fn execute(&self, author_id: i32, input: CommentInput) -> Result<Comment, ApiError> {
        let input = input.trimmed();
        validate(&input, false)?;
        let (Some(Some(text)), Some(Some(review_id))) = (input.text, input.review_id) else {
            return Err(FieldErrors::single("review", REQUIRED).into());
        };
        ensure_review(&self.reviews, review_id).await?;
        let comment = self
            .repo
            .create(&NewComment {
                text,
                author_id,
                review_id,
            })
            .await?;
        tracing::info!(comment_id = comment.id, review_id, author_id, "comment created");
        Ok(comment)
    }
}

// ── UpdateComment ────────────────────────────────────────────────────────────

pub struct UpdateCommentUseCase<C: CommentRepository, R: ReviewRepository> {
    pub repo: C,
    pub reviews: R,
}

impl<C: CommentRepository, R: ReviewRepository> UpdateCommentUseCase<C, R> {
    /// `partial` is set for PATCH; PUT must carry every required field.
    pub async fn execute(
        &self,
        id: i32,
        input: CommentInput,
        partial: bool,
    ) -> Result<Comment, ApiError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApiError::CommentNotFound);
        }
        let input = input.trimmed();
        validate(&input, partial)?;
        let review_id = input.review_id.flatten();
        if let Some(review_id) = review_id {
            ensure_review(&self.reviews, review_id).await?;
        }
        self.repo
            .update(
                id,
                &CommentChanges {
                    text: input.text.flatten(),
                    review_id,
                },
            )
            .await
    }
}

// ── DeleteComment ────────────────────────────────────────────────────────────

pub struct DeleteCommentUseCase<C: CommentRepository> {
    pub repo: C,
}

impl<C: CommentRepository> DeleteCommentUseCase<C> {
    pub async fn execute(&self, id: i32) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::CommentNotFound);
        }
        Ok(())
    }
}
