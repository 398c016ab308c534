use axum::http::{header, HeaderMap, HeaderValue};

use crate::core::error::{AppError, Result};
use crate::shared::constants::SESSION_COOKIE;

/// Bearer token stored in the session cookie, if any
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value storing `token`.
///
/// The token must be a non-empty run of cookie octets (RFC 6265), so it can
/// neither end the pair early nor smuggle in attributes.
pub fn session_cookie(token: &str, secure: bool) -> Result<HeaderValue> {
    if !is_cookie_value(token) {
        return Err(AppError::Internal(
            "Session token is not a valid cookie value".to_string(),
        ));
    }
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|_| AppError::Internal("Session token is not a valid cookie value".to_string()))
}

fn is_cookie_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_graphic() && !matches!(b, b';' | b',' | b'"' | b'\\'))
}

/// `Set-Cookie` value expiring the session cookie
pub fn cleared_session_cookie() -> HeaderValue {
    HeaderValue::from_static(
        "ecosystem_admin_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; ecosystem_admin_session=tok-1; other=x"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_session_token_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("ecosystem_admin_session="),
        );
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok-1", true).unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("ecosystem_admin_session=tok-1;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.ends_with("; Secure"));

        assert!(session_cookie("bad\ntoken", false).is_err());
    }

    #[test]
    fn test_session_cookie_rejects_separators() {
        assert!(session_cookie("eyJhbGciOi.J9-_x", false).is_ok());

        assert!(session_cookie("a;b", false).is_err());
        assert!(session_cookie("a; Domain=evil.example", false).is_err());
        assert!(session_cookie("a,b", false).is_err());
        assert!(session_cookie("a b", false).is_err());
        assert!(session_cookie("\"quoted\"", false).is_err());
        assert!(session_cookie("", false).is_err());
    }

    #[test]
    fn test_cleared_cookie_uses_session_cookie_name() {
        let cleared = cleared_session_cookie();
        assert!(cleared
            .to_str()
            .unwrap()
            .starts_with(&format!("{}=;", SESSION_COOKIE)));
    }
}
