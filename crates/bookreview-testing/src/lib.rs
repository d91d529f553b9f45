//! Test utilities for the book review API.
//!
//! Provides `MockAuth` for signing requests as an arbitrary user.
//! Import in `#[cfg(test)]` blocks and `tests/` only.

pub mod auth;

pub use auth::{MockAuth, TEST_JWT_SECRET};
