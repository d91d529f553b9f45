//! Service plumbing shared by the book review crates.
//!
//! Health probes, request-id middleware, tracing setup, serde helpers and the
//! field-level validation error map.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
pub mod validation;
