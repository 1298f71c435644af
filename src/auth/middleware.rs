//! Tab cookie extraction

use axum::http::HeaderMap;

use crate::auth::jwt::{validate_tab_token, TAB_TOKEN_TTL_SECS};

pub const TAB_COOKIE: &str = "medlearn_tab";

/// Tab id carried by a valid tab cookie, if any
pub fn tab_id_from_headers(headers: &HeaderMap, secret: &str) -> Option<String> {
    let prefix = format!("{}=", TAB_COOKIE);

    for value in headers.get_all("Cookie") {
        let Ok(cookie_str) = value.to_str() else {
            continue;
        };
        for cookie in cookie_str.split(';') {
            if let Some(token) = cookie.trim().strip_prefix(prefix.as_str()) {
                match validate_tab_token(token, secret) {
                    Ok(claims) => return Some(claims.sub),
                    Err(e) => tracing::debug!("Ignoring invalid tab cookie: {}", e),
                }
            }
        }
    }

    None
}

/// Set-Cookie value for a tab token
pub fn tab_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        TAB_COOKIE,
        token,
        TAB_TOKEN_TTL_SECS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::create_tab_token;
    use axum::http::HeaderValue;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_cookie_lifetime_matches_token() {
        let cookie = tab_cookie("abc");
        assert!(cookie.starts_with("medlearn_tab=abc;"));
        assert!(cookie.ends_with(&format!("Max-Age={}", TAB_TOKEN_TTL_SECS)));
    }

    #[test]
    fn test_no_cookie() {
        let headers = HeaderMap::new();
        assert!(tab_id_from_headers(&headers, SECRET).is_none());
    }

    #[test]
    fn test_valid_cookie_among_others() {
        let token = create_tab_token("tab-42", SECRET).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            "Cookie",
            HeaderValue::from_str(&format!("theme=dark; {}={}", TAB_COOKIE, token)).unwrap(),
        );
        assert_eq!(tab_id_from_headers(&headers, SECRET).as_deref(), Some("tab-42"));
    }

    #[test]
    fn test_forged_cookie_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Cookie",
            HeaderValue::from_str(&format!("{}=tab-42", TAB_COOKIE)).unwrap(),
        );
        assert!(tab_id_from_headers(&headers, SECRET).is_none());
    }
}
