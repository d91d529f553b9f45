//! `Authorization` header parsing.

/// Accepted authorization schemes, compared case-insensitively.
pub const AUTH_HEADER_TYPES: [&str; 2] = ["Bearer", "JWT"];

/// Extract the raw token from an `Authorization` header value.
///
/// Returns `None` for an unknown scheme, a missing token, or trailing garbage.
pub fn parse_authorization(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    AUTH_HEADER_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(scheme))
        .then_some(token)
}
