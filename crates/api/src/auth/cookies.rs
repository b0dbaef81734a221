//! Session cookies for page navigation.
//!
//! API clients send a Bearer token; browsers navigating pages carry the
//! same credentials in HttpOnly cookies so the gate middleware can resolve
//! and refresh the session server-side.

use axum::http::HeaderMap;

/// Cookie holding the JWT access token.
pub const COOKIE_ACCESS: &str = "ss_access";

/// Cookie holding the opaque refresh token.
pub const COOKIE_REFRESH: &str = "ss_refresh";

/// Read a cookie value from the request `Cookie` header.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Build a `Set-Cookie` value for the access token.
pub fn access_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{COOKIE_ACCESS}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// Build a `Set-Cookie` value for the refresh token.
pub fn refresh_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{COOKIE_REFRESH}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// `Set-Cookie` values that clear both session cookies (logout).
pub fn clear_cookies() -> [String; 2] {
    [
        format!("{COOKIE_ACCESS}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"),
        format!("{COOKIE_REFRESH}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    #[test]
    fn reads_cookie_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("other=1; ss_access=tok-123; ss_refresh=ref-456"),
        );
        assert_eq!(read_cookie(&headers, COOKIE_ACCESS).as_deref(), Some("tok-123"));
        assert_eq!(read_cookie(&headers, COOKIE_REFRESH).as_deref(), Some("ref-456"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn missing_header_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(read_cookie(&headers, COOKIE_ACCESS), None);
    }

    #[test]
    fn set_cookie_values_are_http_only() {
        let cookie = access_cookie("abc", 900);
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.starts_with("ss_access=abc"));
        for cleared in clear_cookies() {
            assert!(cleared.contains("Max-Age=0"));
        }
    }
}
