//! `Authorization: Bearer <token>` parsing.

use http::HeaderMap;
use http::header::AUTHORIZATION;

/// Return the bearer token from the `Authorization` header, if present and well-formed.
///
/// The scheme is matched case-insensitively; surrounding whitespace is trimmed.
/// An empty token is treated as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
