use chrono::{DateTime, Utc};

pub const EMAIL_MAX_LEN: usize = 50;
pub const PASSWORD_MAX_LEN: usize = 128;
pub const NICK_NAME_MAX_LEN: usize = 20;
pub const TITLE_MAX_LEN: usize = 100;
pub const BOOK_NAME_MAX_LEN: usize = 100;
pub const CONTENT_MAX_LEN: usize = 1000;
pub const COMMENT_TEXT_MAX_LEN: usize = 100;

pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const EMAIL_TAKEN: &str = "user with this email already exists.";
pub const PROFILE_TAKEN: &str = "profile for this user already exists.";
pub const EMPTY_FILE: &str = "The submitted file is empty.";

/// Registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
}

/// Account to be inserted; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub id: i32,
    pub nick_name: String,
    pub owner_id: i32,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub nick_name: String,
    pub owner_id: i32,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Columns to overwrite; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub nick_name: Option<String>,
    pub avatar: Option<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub id: i32,
    pub title: String,
    pub book_name: String,
    pub content: String,
    pub author_id: i32,
    pub img: Option<String>,
    /// Ascending, without duplicates.
    pub liked_user_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub title: String,
    pub book_name: String,
    pub content: String,
    pub author_id: i32,
    pub img: Option<String>,
    pub liked_user_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewChanges {
    pub title: Option<String>,
    pub book_name: Option<String>,
    pub content: Option<String>,
    pub img: Option<Option<String>>,
    /// Replaces the whole set when present.
    pub liked_user_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i32,
    pub text: String,
    pub author_id: i32,
    pub review_id: i32,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub author_id: i32,
    pub review_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct CommentChanges {
    pub text: Option<String>,
    pub review_id: Option<i32>,
}

/// Message for a related id that matches no row.
pub fn unknown_pk(id: i32) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// Canonical form used for storage and lookup: trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Structural email check: `local@domain.tld`, no whitespace, no empty labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}

/// Storage path for an uploaded image: `{dir}/{owner_id}{stem}.{ext}`.
///
/// `ext` is everything after the last `.` of the original file name (the whole
/// name when it has no dot).
pub fn upload_path(dir: &str, owner_id: i32, stem: &str, filename: &str) -> String {
    let ext = filename.rsplit('.').next().unwrap_or(filename);
    format!("{dir}/{owner_id}{stem}.{ext}")
}

pub fn avatar_upload_path(owner_id: i32, nick_name: &str, filename: &str) -> String {
    upload_path("avatars", owner_id, nick_name, filename)
}

pub fn review_upload_path(author_id: i32, title: &str, filename: &str) -> String {
    upload_path("reviews", author_id, title, filename)
}
