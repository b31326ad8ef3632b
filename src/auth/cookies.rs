use std::time::Duration;

use axum::http::{header, HeaderMap, HeaderName};

/// Value of the named cookie from the `Cookie` header, if present and non-empty.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|s| s.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if key == name && !value.is_empty() => {
                    Some(value.to_string())
                }
                _ => None,
            }
        })
}

fn attributes(max_age: u64, secure: bool) -> String {
    let mut attrs = format!("Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        attrs.push_str("; Secure");
    }
    attrs
}

/// `Set-Cookie` header living as long as the token it carries.
pub fn set_cookie(name: &str, value: &str, ttl: Duration, secure: bool) -> (HeaderName, String) {
    (
        header::SET_COOKIE,
        format!("{name}={value}; {}", attributes(ttl.as_secs(), secure)),
    )
}

pub fn clear_cookie(name: &str, secure: bool) -> (HeaderName, String) {
    (header::SET_COOKIE, format!("{name}=; {}", attributes(0, secure)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("a=1; access=xyz; b=2"));
        assert_eq!(read_cookie(&headers, "access").as_deref(), Some("xyz"));
        assert_eq!(read_cookie(&headers, "refresh"), None);
    }

    #[test]
    fn empty_cookie_value_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("access="));
        assert_eq!(read_cookie(&headers, "access"), None);
    }

    #[test]
    fn set_cookie_carries_ttl_and_flags() {
        let (name, value) = set_cookie("access", "tok", Duration::from_secs(300), true);
        assert_eq!(name, header::SET_COOKIE);
        assert_eq!(value, "access=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=300; Secure");
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let (_, value) = clear_cookie("refresh", false);
        assert_eq!(value, "refresh=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    }
}
