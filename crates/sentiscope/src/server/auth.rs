//! Bearer-token authentication.
//!
//! A static token → user-id map from config stands in for a hosted auth
//! service. The rest of the service only ever sees the opaque user id.

use std::collections::HashMap;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

/// Resolve the caller's user id from an `Authorization: Bearer` header.
///
/// Returns `None` for a missing header, a non-bearer scheme, or an
/// unknown token. Anonymous callers are allowed on some routes, so this
/// does not reject by itself.
pub fn authenticate(headers: &HeaderMap, tokens: &HashMap<String, String>) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    tokens.get(token).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> HashMap<String, String> {
        HashMap::from([("tok-1".to_string(), "user-1".to_string())])
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn known_token_resolves_user() {
        let user = authenticate(&headers("Bearer tok-1"), &tokens());
        assert_eq!(user.as_deref(), Some("user-1"));
    }

    #[test]
    fn unknown_token_is_anonymous() {
        assert!(authenticate(&headers("Bearer nope"), &tokens()).is_none());
    }

    #[test]
    fn missing_header_is_anonymous() {
        assert!(authenticate(&HeaderMap::new(), &tokens()).is_none());
    }

    #[test]
    fn non_bearer_scheme_is_anonymous() {
        assert!(authenticate(&headers("Basic dXNlcjpwYXNz"), &tokens()).is_none());
    }
}
