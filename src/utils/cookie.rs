use axum::http::{header, HeaderMap};

use crate::utils::token::TOKEN_TTL_SECS;

pub(crate) const TOKEN_COOKIE: &str = "token";

/// Returns the session token carried in the `Cookie` request header, if any.
pub(crate) fn extract(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(header::COOKIE)?.to_str().ok()?;

    for pair in header.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };

        let Ok(name) = urlencoding::decode(name) else {
            continue;
        };

        if name == TOKEN_COOKIE {
            return urlencoding::decode(value).ok().map(|value| value.into_owned());
        }
    }

    None
}

/// Builds the `Set-Cookie` value that installs a session token.
///
/// Max-Age tracks the token's own expiry. The coupling is deliberately loose:
/// if either outlives the other, the survivor is useless on its own.
pub(crate) fn set_header(token: &str, secure: bool) -> String {
    let mut header = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        TOKEN_COOKIE,
        urlencoding::encode(token),
        TOKEN_TTL_SECS
    );

    if secure {
        header.push_str("; Secure");
    }

    header
}

/// Builds the `Set-Cookie` value that deletes the session cookie client-side.
pub(crate) fn clear_header(secure: bool) -> String {
    let mut header = format!("{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax", TOKEN_COOKIE);

    if secure {
        header.push_str("; Secure");
    }

    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_missing_header() {
        assert_eq!(extract(&HeaderMap::new()), None);
    }

    #[test]
    fn test_extract_token_cookie() {
        let headers = headers_with_cookie("token=abc.def.ghi");

        assert_eq!(extract(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_extract_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; token=abc; _ga=GA1.2");

        assert_eq!(extract(&headers), Some("abc".to_string()));
    }

    #[test]
    fn test_extract_url_decodes_value() {
        let headers = headers_with_cookie("token=a%2Eb%2Ec");

        assert_eq!(extract(&headers), Some("a.b.c".to_string()));
    }

    #[test]
    fn test_extract_ignores_flag_cookies() {
        let headers = headers_with_cookie("flag; token=abc");

        assert_eq!(extract(&headers), Some("abc".to_string()));
    }

    #[test]
    fn test_extract_absent_token() {
        let headers = headers_with_cookie("theme=dark");

        assert_eq!(extract(&headers), None);
    }

    #[test]
    fn test_set_header_attributes() {
        let header = set_header("abc", false);

        assert_eq!(
            header,
            "token=abc; HttpOnly; Path=/; Max-Age=604800; SameSite=Lax"
        );
    }

    #[test]
    fn test_set_header_secure_in_production() {
        assert!(set_header("abc", true).ends_with("; Secure"));
        assert!(!set_header("abc", false).contains("Secure"));
    }

    #[test]
    fn test_clear_header() {
        assert_eq!(
            clear_header(false),
            "token=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax"
        );
    }

    #[test]
    fn test_cookie_round_trip() {
        let set = set_header("abc.def.ghi", false);
        // a browser replays everything before the first attribute verbatim
        let replayed = set.split(';').next().unwrap();

        let headers = headers_with_cookie(replayed);

        assert_eq!(extract(&headers), Some("abc.def.ghi".to_string()));
    }
}
