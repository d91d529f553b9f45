pub mod comment;
pub mod extract;
pub mod health;
pub mod profile;
pub mod review;
pub mod token;
pub mod user;
