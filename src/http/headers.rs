//! Header forwarding policy.
//!
//! # Responsibilities
//! - Central deny-list for headers that must not cross the proxy boundary
//! - Filtered copying of headers in both directions
//!
//! # Design Decisions
//! - Deny-list, not allow-list: the gateway sets headers we want clients to
//!   see (cache hints, rate-limit state) and enumerating them would break
//!   every time the gateway adds one.
//! - One list for both directions. Splitting request/response lists is easy
//!   later if a header ever needs to cross one way only.

use axum::http::{HeaderMap, HeaderName};

/// Headers that are never forwarded, in either direction.
///
/// Hop-by-hop headers must not be forwarded in proxied requests
/// (RFC 2616 section 13.5.1). The remainder are programmatic headers that
/// describe a specific connection or body and would be wrong on the other
/// side of the proxy.
const FORWARD_DENY_LIST: &[&str] = &[
    // hop-by-hop
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
    // programmatic
    "content-length",
    "content-type",
    "content-encoding",
    "user-agent",
    "host",
    "accept-encoding",
];

/// Whether a header may cross the proxy boundary.
///
/// `HeaderName` is already lowercase, so a direct comparison is safe. The
/// list is small enough that a linear scan beats a set lookup.
pub fn should_forward(name: &HeaderName) -> bool {
    !FORWARD_DENY_LIST.contains(&name.as_str())
}

/// Copy every forwardable header from `src` into `dst`.
///
/// Headers already present in `dst` keep their existing value; a proxied
/// header never clobbers one this service set deliberately. For
/// duplicate-valued source headers the first value wins.
pub fn forward_headers(src: &HeaderMap, dst: &mut HeaderMap) {
    for name in src.keys() {
        if !should_forward(name) || dst.contains_key(name) {
            continue;
        }
        if let Some(value) = src.get(name) {
            dst.insert(name.clone(), value.clone());
        }
    }
}

/// Remove denied headers in place. Applied to outbound gateway requests as a
/// final guard so no auth scheme can attach a hop-by-hop header.
pub fn strip_denied(headers: &mut HeaderMap) {
    let denied: Vec<HeaderName> = headers
        .keys()
        .filter(|name| !should_forward(name))
        .cloned()
        .collect();
    for name in denied {
        headers.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_deny_list_blocks_both_classes() {
        for denied in ["connection", "transfer-encoding", "content-type", "host"] {
            let name = HeaderName::from_static(denied);
            assert!(!should_forward(&name), "{denied} must not forward");
        }
    }

    #[test]
    fn test_unlisted_headers_forward() {
        for allowed in ["x-cache", "etag", "set-cookie", "x-request-id"] {
            let name = HeaderName::from_static(allowed);
            assert!(should_forward(&name), "{allowed} must forward");
        }
    }

    #[test]
    fn test_forward_headers_filters_and_preserves_existing() {
        let mut src = HeaderMap::new();
        src.insert("x-cache", HeaderValue::from_static("HIT"));
        src.insert("content-type", HeaderValue::from_static("text/html"));
        src.insert("etag", HeaderValue::from_static("upstream"));

        let mut dst = HeaderMap::new();
        dst.insert("etag", HeaderValue::from_static("ours"));
        dst.insert("content-type", HeaderValue::from_static("application/json"));

        forward_headers(&src, &mut dst);

        assert_eq!(dst.get("x-cache").unwrap(), "HIT");
        // deny-listed header did not clobber ours
        assert_eq!(dst.get("content-type").unwrap(), "application/json");
        // existing header kept its value
        assert_eq!(dst.get("etag").unwrap(), "ours");
    }

    #[test]
    fn test_forward_headers_takes_first_duplicate_value() {
        let mut src = HeaderMap::new();
        src.append("x-multi", HeaderValue::from_static("first"));
        src.append("x-multi", HeaderValue::from_static("second"));

        let mut dst = HeaderMap::new();
        forward_headers(&src, &mut dst);

        let values: Vec<_> = dst.get_all("x-multi").iter().collect();
        assert_eq!(values, vec!["first"]);
    }

    #[test]
    fn test_strip_denied_removes_in_place() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("a=1"));
        headers.insert("connection", HeaderValue::from_static("keep-alive"));
        headers.insert("user-agent", HeaderValue::from_static("test"));

        strip_denied(&mut headers);

        assert!(headers.contains_key("cookie"));
        assert!(!headers.contains_key("connection"));
        assert!(!headers.contains_key("user-agent"));
    }
}
