//! Web-session cookie authentication.
//!
//! The gateway performs all real session validation; this scheme only
//! checks that the session cookies are present and forwards the original
//! cookie header on the outbound call.

use std::collections::HashMap;

use axum::http::{header, HeaderMap, HeaderValue};

use crate::auth::capability::AuthCapability;

/// Encoded user identifier. Derived, non-sensitive, safe to log.
pub const USER_ID_COOKIE: &str = "a95b4b6";
/// Direct session identifier. Never exposed outside authentication.
pub const SESSION_ID_COOKIE: &str = "d4a79ec";
/// Session lookup id. Never exposed outside authentication.
pub const LOOKUP_ID_COOKIE: &str = "159e76e";

/// Session-cookie credential capability.
///
/// Hard-fail construction policy: every session cookie must be present or
/// `from_headers` returns `None` and the caller answers 401 without touching
/// the gateway. Endpoints that can serve anonymous callers use
/// [`crate::auth::AnonymousAuth`] instead; no endpoint mixes the two
/// policies.
pub struct WebSessionAuth {
    /// The full original cookie header, forwarded verbatim upstream.
    cookie_header: HeaderValue,
    /// Derived user identifier, the only cookie value that may be logged.
    encoded_user_id: String,
}

impl WebSessionAuth {
    /// Build the capability from inbound request headers.
    ///
    /// Returns `None` unless the cookie header and all three session
    /// cookies are present and non-empty.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let cookie_header = headers.get(header::COOKIE)?;
        let cookies = cookie_header.to_str().ok()?;

        let encoded_user_id = cookie_value(cookies, USER_ID_COOKIE)?;
        cookie_value(cookies, SESSION_ID_COOKIE)?;
        cookie_value(cookies, LOOKUP_ID_COOKIE)?;

        Some(Self {
            cookie_header: cookie_header.clone(),
            encoded_user_id: encoded_user_id.to_string(),
        })
    }
}

impl AuthCapability for WebSessionAuth {
    /// Forward the original cookie header. The gateway owns session
    /// validation; nothing is decoded or re-signed here.
    fn authenticate(&self, headers: &mut HeaderMap) {
        headers.insert(header::COOKIE, self.cookie_header.clone());
    }

    fn identity_tags(&self) -> HashMap<String, String> {
        HashMap::from([
            ("auth".to_string(), "WebSessionAuth".to_string()),
            ("user".to_string(), self.encoded_user_id.clone()),
        ])
    }
}

/// Extract a cookie value by name from a raw cookie header.
///
/// Empty values count as absent: a client that sends `a95b4b6=;` has not
/// authenticated.
fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key.trim() == name).then_some(value.trim())
        })
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_headers(cookies: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookies).unwrap());
        headers
    }

    const FULL_COOKIES: &str = "a95b4b6=user123; d4a79ec=session456; 159e76e=lookup789";

    #[test]
    fn test_constructs_with_all_cookies() {
        let auth = WebSessionAuth::from_headers(&session_headers(FULL_COOKIES));
        assert!(auth.is_some());
    }

    #[test]
    fn test_fails_without_cookie_header() {
        assert!(WebSessionAuth::from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_fails_when_any_session_cookie_missing() {
        for missing in [USER_ID_COOKIE, SESSION_ID_COOKIE, LOOKUP_ID_COOKIE] {
            let cookies: Vec<&str> = FULL_COOKIES
                .split("; ")
                .filter(|pair| !pair.starts_with(missing))
                .collect();
            let headers = session_headers(&cookies.join("; "));
            assert!(
                WebSessionAuth::from_headers(&headers).is_none(),
                "must fail without {missing}"
            );
        }
    }

    #[test]
    fn test_empty_cookie_value_counts_as_absent() {
        let headers = session_headers("a95b4b6=; d4a79ec=s; 159e76e=l");
        assert!(WebSessionAuth::from_headers(&headers).is_none());
    }

    #[test]
    fn test_authenticate_forwards_original_cookie_header() {
        let auth = WebSessionAuth::from_headers(&session_headers(FULL_COOKIES)).unwrap();
        let mut outbound = HeaderMap::new();
        auth.authenticate(&mut outbound);
        assert_eq!(outbound.get(header::COOKIE).unwrap(), FULL_COOKIES);
    }

    #[test]
    fn test_identity_tags_redact_session_material() {
        let auth = WebSessionAuth::from_headers(&session_headers(FULL_COOKIES)).unwrap();
        let tags = auth.identity_tags();

        assert_eq!(tags.get("auth").unwrap(), "WebSessionAuth");
        assert_eq!(tags.get("user").unwrap(), "user123");

        let rendered = format!("{tags:?}");
        assert!(!rendered.contains("session456"));
        assert!(!rendered.contains("lookup789"));
    }
}
