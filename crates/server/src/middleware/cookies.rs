//! Request cookie parsing and the remember-me cookie.

use axum::http::{HeaderMap, HeaderName, header};
use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::{Cookie, SameSite};
use uuid::Uuid;

use crate::config::ServerConfig;

/// Name of the persistent remember-me cookie.
pub const REMEMBER_COOKIE_NAME: &str = "remember_token";

/// All cookies sent with a request, in header order.
///
/// Malformed pairs and non-UTF-8 headers are skipped.
#[must_use]
pub fn request_cookies(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
        .collect()
}

/// Value of the first cookie with the given name.
#[must_use]
pub fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    request_cookies(headers)
        .into_iter()
        .find_map(|(key, value)| (key == name).then_some(value))
}

/// Build the remember-me cookie carrying `token`.
#[must_use]
pub fn remember_cookie(token: Uuid, config: &ServerConfig) -> Cookie<'static> {
    Cookie::build((REMEMBER_COOKIE_NAME, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies())
        .same_site(SameSite::Lax)
        .max_age(Duration::days(config.remember_days))
        .build()
}

/// Build a cookie that makes the client drop its remember-me cookie.
#[must_use]
pub fn remember_removal_cookie(config: &ServerConfig) -> Cookie<'static> {
    let mut cookie = remember_cookie(Uuid::nil(), config);
    cookie.make_removal();
    cookie
}

/// Render a cookie as a `Set-Cookie` header pair.
#[must_use]
pub fn set_cookie_header(cookie: &Cookie<'_>) -> (HeaderName, String) {
    (header::SET_COOKIE, cookie.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(cookie: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static(cookie));
        headers
    }

    #[test]
    fn test_request_cookies_in_order() {
        let headers = headers("a=1; theme=dark; b=");
        assert_eq!(
            request_cookies(&headers),
            vec![
                ("a".to_string(), "1".to_string()),
                ("theme".to_string(), "dark".to_string()),
                ("b".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_find_cookie() {
        let headers = headers("a=1; remember_token=abc");
        assert_eq!(
            find_cookie(&headers, REMEMBER_COOKIE_NAME).as_deref(),
            Some("abc")
        );
        assert_eq!(find_cookie(&headers, "missing"), None);
        assert!(request_cookies(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_remember_cookie_attributes() {
        let config = ServerConfig::default();
        let token = Uuid::new_v4();
        let rendered = remember_cookie(token, &config).to_string();

        assert!(rendered.starts_with(&format!("remember_token={token}")));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains(&format!("Max-Age={}", 365 * 24 * 60 * 60)));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn test_secure_when_https() {
        let config = ServerConfig {
            base_url: "https://labs.example.com".to_string(),
            ..ServerConfig::default()
        };
        let rendered = remember_cookie(Uuid::new_v4(), &config).to_string();
        assert!(rendered.contains("Secure"));
    }

    #[test]
    fn test_longest_accepted_lifetime_builds_cookie() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "WEB_LABS_REMEMBER_DAYS").then(|| "36500".to_string())
        })
        .unwrap();
        let rendered = remember_cookie(Uuid::new_v4(), &config).to_string();
        assert!(rendered.contains(&format!("Max-Age={}", 36_500_i64 * 24 * 60 * 60)));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let rendered = remember_removal_cookie(&ServerConfig::default()).to_string();
        assert!(rendered.starts_with("remember_token=;"));
        assert!(rendered.contains("Max-Age=0"));
    }
}
