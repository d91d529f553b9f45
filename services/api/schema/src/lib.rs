//! sea-orm entities for the book review API.

pub mod comments;
pub mod profiles;
pub mod review_liked_users;
pub mod reviews;
pub mod users;
