use std::collections::BTreeMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionError,
    TransactionTrait,
};

use bookreview_api_schema::{comments, profiles, review_liked_users, reviews, users};
use bookreview_core::validation::FieldErrors;

use crate::domain::repository::{
    CommentRepository, ProfileRepository, ReviewRepository, UserRepository,
};
use crate::domain::types::{
    Comment, CommentChanges, EMAIL_TAKEN, NewComment, NewProfile, NewReview, NewUser,
    PROFILE_TAKEN, Profile, ProfileChanges, Review, ReviewChanges, User, unknown_pk,
};
use crate::error::ApiError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// A referenced row disappeared between validation and the write.
fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

fn is_foreign_key_violation_in(err: &TransactionError<DbErr>) -> bool {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => {
            is_foreign_key_violation(e)
        }
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let result = users::ActiveModel {
            email: Set(user.email.clone()),
            password: Set(user.password_hash.clone()),
            is_active: Set(true),
            is_staff: Set(user.is_staff),
            is_superuser: Set(user.is_superuser),
            last_login: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(user_from_model(model)),
            Err(err) if is_unique_violation(&err) => {
                Err(FieldErrors::single("email", EMAIL_TAKEN).into())
            }
            Err(err) => Err(anyhow::Error::new(err).context("create user").into()),
        }
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ApiError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let found = users::Entity::find()
            .select_only()
            .column(users::Column::Id)
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("find existing user ids")?;
        Ok(found)
    }

    async fn record_login(&self, id: i32, at: DateTime<Utc>) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            last_login: Set(Some(at)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("record last login")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(move |txn| {
                Box::pin(async move {
                    let review_ids: Vec<i32> = reviews::Entity::find()
                        .select_only()
                        .column(reviews::Column::Id)
                        .filter(reviews::Column::UserId.eq(id))
                        .into_tuple()
                        .all(txn)
                        .await?;
                    comments::Entity::delete_many()
                        .filter(
                            Condition::any()
                                .add(comments::Column::UserId.eq(id))
                                .add(comments::Column::ReviewId.is_in(review_ids.clone())),
                        )
                        .exec(txn)
                        .await?;
                    review_liked_users::Entity::delete_many()
                        .filter(
                            Condition::any()
                                .add(review_liked_users::Column::UserId.eq(id))
                                .add(review_liked_users::Column::ReviewId.is_in(review_ids)),
                        )
                        .exec(txn)
                        .await?;
                    reviews::Entity::delete_many()
                        .filter(reviews::Column::UserId.eq(id))
                        .exec(txn)
                        .await?;
                    profiles::Entity::delete_many()
                        .filter(profiles::Column::UserId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = users::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete user with owned records")?;
        Ok(deleted)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password,
        is_active: model.is_active,
        is_staff: model.is_staff,
        is_superuser: model.is_superuser,
        last_login: model.last_login,
    }
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn list(&self, owner_id: Option<i32>) -> Result<Vec<Profile>, ApiError> {
        let mut query = profiles::Entity::find();
        if let Some(owner_id) = owner_id {
            query = query.filter(profiles::Column::UserId.eq(owner_id));
        }
        let models = query
            .order_by_asc(profiles::Column::Id)
            .all(&self.db)
            .await
            .context("list profiles")?;
        Ok(models.into_iter().map(profile_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Profile>, ApiError> {
        let model = profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        Ok(model.map(profile_from_model))
    }

    async fn create(&self, profile: &NewProfile) -> Result<Profile, ApiError> {
        let result = profiles::ActiveModel {
            nick_name: Set(profile.nick_name.clone()),
            user_id: Set(profile.owner_id),
            avatar: Set(profile.avatar.clone()),
            created_at: Set(profile.created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(profile_from_model(model)),
            Err(err) if is_unique_violation(&err) => {
                Err(FieldErrors::single("userProfile", PROFILE_TAKEN).into())
            }
            Err(err) => Err(anyhow::Error::new(err).context("create profile").into()),
        }
    }

    async fn update(&self, id: i32, changes: &ProfileChanges) -> Result<Profile, ApiError> {
        let mut am = profiles::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(ref nick_name) = changes.nick_name {
            am.nick_name = Set(nick_name.clone());
        }
        if let Some(ref avatar) = changes.avatar {
            am.avatar = Set(avatar.clone());
        }
        if am.is_changed() {
            am.update(&self.db).await.context("update profile")?;
        }
        self.find_by_id(id).await?.ok_or(ApiError::ProfileNotFound)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = profiles::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete profile")?;
        Ok(result.rows_affected > 0)
    }
}

fn profile_from_model(model: profiles::Model) -> Profile {
    Profile {
        id: model.id,
        nick_name: model.nick_name,
        owner_id: model.user_id,
        avatar: model.avatar,
        created_at: model.created_at,
    }
}

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn list(&self) -> Result<Vec<Review>, ApiError> {
        let models = reviews::Entity::find()
            .order_by_asc(reviews::Column::Id)
            .all(&self.db)
            .await
            .context("list reviews")?;
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut liked = load_liked_users(&self.db, &ids)
            .await
            .context("list review likes")?;
        Ok(models
            .into_iter()
            .map(|m| {
                let liked_user_ids = liked.remove(&m.id).unwrap_or_default();
                review_from_model(m, liked_user_ids)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Review>, ApiError> {
        let review = find_review(&self.db, id)
            .await
            .context("find review by id")?;
        Ok(review)
    }

    async fn exists(&self, id: i32) -> Result<bool, ApiError> {
        let count = reviews::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .context("check review exists")?;
        Ok(count > 0)
    }

    async fn create(&self, review: &NewReview) -> Result<Review, ApiError> {
        let liked_user_ids = review.liked_user_ids.clone();
        let review = review.clone();
        let result = self
            .db
            .transaction::<_, Review, DbErr>(|txn| {
                Box::pin(async move {
                    let model = reviews::ActiveModel {
                        title: Set(review.title),
                        book_name: Set(review.book_name),
                        content: Set(review.content),
                        user_id: Set(review.author_id),
                        img: Set(review.img),
                        created_at: Set(review.created_at),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    insert_liked_users(txn, model.id, &review.liked_user_ids).await?;
                    Ok(review_from_model(model, review.liked_user_ids))
                })
            })
            .await;
        match result {
            Ok(created) => Ok(created),
            Err(err) if is_foreign_key_violation_in(&err) => {
                let errors = self.vanished_liked_users(&liked_user_ids).await?;
                if errors.is_empty() {
                    Err(anyhow::Error::new(err).context("create review with likes").into())
                } else {
                    Err(errors.into())
                }
            }
            Err(err) => Err(anyhow::Error::new(err).context("create review with likes").into()),
        }
    }

    async fn update(&self, id: i32, changes: &ReviewChanges) -> Result<Review, ApiError> {
        let liked_user_ids = changes.liked_user_ids.clone().unwrap_or_default();
        let changes = changes.clone();
        let result = self
            .db
            .transaction::<_, Option<Review>, DbErr>(move |txn| {
                Box::pin(async move {
                    let mut am = reviews::ActiveModel {
                        id: Unchanged(id),
                        ..Default::default()
                    };
                    if let Some(title) = changes.title {
                        am.title = Set(title);
                    }
                    if let Some(book_name) = changes.book_name {
                        am.book_name = Set(book_name);
                    }
                    if let Some(content) = changes.content {
                        am.content = Set(content);
                    }
                    if let Some(img) = changes.img {
                        am.img = Set(img);
                    }
                    if am.is_changed() {
                        am.update(txn).await?;
                    }
                    if let Some(liked_user_ids) = changes.liked_user_ids {
                        review_liked_users::Entity::delete_many()
                            .filter(review_liked_users::Column::ReviewId.eq(id))
                            .exec(txn)
                            .await?;
                        insert_liked_users(txn, id, &liked_user_ids).await?;
                    }
                    find_review(txn, id).await
                })
            })
            .await;
        match result {
            Ok(updated) => updated.ok_or(ApiError::ReviewNotFound),
            // Either a liked user or the review itself is gone.
            Err(err) if is_foreign_key_violation_in(&err) => {
                let errors = self.vanished_liked_users(&liked_user_ids).await?;
                if errors.is_empty() {
                    Err(ApiError::ReviewNotFound)
                } else {
                    Err(errors.into())
                }
            }
            Err(err) => Err(anyhow::Error::new(err).context("update review").into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(move |txn| {
                Box::pin(async move {
                    comments::Entity::delete_many()
                        .filter(comments::Column::ReviewId.eq(id))
                        .exec(txn)
                        .await?;
                    review_liked_users::Entity::delete_many()
                        .filter(review_liked_users::Column::ReviewId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = reviews::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete review with comments")?;
        Ok(deleted)
    }
}

impl DbReviewRepository {
    /// Liked-by ids that no longer name a user, as `likedUser` errors.
    async fn vanished_liked_users(&self, liked_user_ids: &[i32]) -> Result<FieldErrors, ApiError> {
        let users = DbUserRepository {
            db: self.db.clone(),
        };
        let existing = users.existing_ids(liked_user_ids).await?;
        let mut errors = FieldErrors::new();
        for id in liked_user_ids.iter().filter(|id| !existing.contains(id)) {
            errors.add("likedUser", unknown_pk(*id));
        }
        Ok(errors)
    }
}

async fn find_review<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Review>, DbErr> {
    let Some(model) = reviews::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut liked = load_liked_users(db, &[id]).await?;
    let liked_user_ids = liked.remove(&id).unwrap_or_default();
    Ok(Some(review_from_model(model, liked_user_ids)))
}

/// Liked-by user ids per review, each list ascending.
async fn load_liked_users<C: ConnectionTrait>(
    db: &C,
    review_ids: &[i32],
) -> Result<BTreeMap<i32, Vec<i32>>, DbErr> {
    let mut liked: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    if review_ids.is_empty() {
        return Ok(liked);
    }
    let rows = review_liked_users::Entity::find()
        .filter(review_liked_users::Column::ReviewId.is_in(review_ids.iter().copied()))
        .order_by_asc(review_liked_users::Column::UserId)
        .all(db)
        .await?;
    for row in rows {
        liked.entry(row.review_id).or_default().push(row.user_id);
    }
    Ok(liked)
}

async fn insert_liked_users<C: ConnectionTrait>(
    db: &C,
    review_id: i32,
    user_ids: &[i32],
) -> Result<(), DbErr> {
    if user_ids.is_empty() {
        return Ok(());
    }
    review_liked_users::Entity::insert_many(user_ids.iter().map(|&user_id| {
        review_liked_users::ActiveModel {
            review_id: Set(review_id),
            user_id: Set(user_id),
        }
    }))
    .exec_without_returning(db)
    .await?;
    Ok(())
}

fn review_from_model(model: reviews::Model, liked_user_ids: Vec<i32>) -> Review {
    Review {
        id: model.id,
        title: model.title,
        book_name: model.book_name,
        content: model.content,
        author_id: model.user_id,
        img: model.img,
        liked_user_ids,
        created_at: model.created_at,
    }
}

// ── Comment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl CommentRepository for DbCommentRepository {
    async fn list(&self) -> Result<Vec<Comment>, ApiError> {
        let models = comments::Entity::find()
            .order_by_asc(comments::Column::Id)
            .all(&self.db)
            .await
            .context("list comments")?;
        Ok(models.into_iter().map(comment_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, ApiError> {
        let model = comments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find comment by id")?;
        Ok(model.map(comment_from_model))
    }

    async fn create(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        let result = comments::ActiveModel {
            text: Set(comment.text.clone()),
            user_id: Set(comment.author_id),
            review_id: Set(comment.review_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(comment_from_model(model)),
            Err(err) if is_foreign_key_violation(&err) => Err(ApiError::ReviewNotFound),
            Err(err) => Err(anyhow::Error::new(err).context("create comment").into()),
        }
    }

    async fn update(&self, id: i32, changes: &CommentChanges) -> Result<Comment, ApiError> {
        let mut am = comments::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(ref text) = changes.text {
            am.text = Set(text.clone());
        }
        if let Some(review_id) = changes.review_id {
            am.review_id = Set(review_id);
        }
        if am.is_changed() {
            match am.update(&self.db).await {
                Ok(_) => {}
                Err(err) if is_foreign_key_violation(&err) => {
                    return Err(ApiError::ReviewNotFound);
                }
                Err(err) => {
                    return Err(anyhow::Error::new(err).context("update comment").into());
                }
            }
        }
        self.find_by_id(id).await?.ok_or(ApiError::CommentNotFound)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = comments::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete comment")?;
        Ok(result.rows_affected > 0)
    }
}

fn comment_from_model(model: comments::Model) -> Comment {
    Comment {
        id: model.id,
        text: model.text,
        author_id: model.user_id,
        review_id: model.review_id,
    }
}
