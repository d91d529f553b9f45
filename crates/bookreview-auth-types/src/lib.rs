//! Auth types for the book review API.
//!
//! Provides JWT issuing and validation plus `Authorization` header parsing.

pub mod header;
pub mod token;
