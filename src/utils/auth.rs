use axum::extract::State;
use axum::{body::Body, extract::Request, http::HeaderMap, http::Response, middleware::Next};
use chrono::Utc;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::utils::cookie;
use crate::utils::token::TokenCodec;

/// The authenticated caller of a protected request.
#[derive(Clone, Copy, Debug)]
pub(crate) struct UserId(pub(crate) i32);

/// The caller of a personalizable request: a user id, or anonymous.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Session(pub(crate) Option<i32>);

/// Answers "who is the caller, if anyone" for an inbound request.
///
/// A missing cookie, a malformed token, a bad signature and an expired token
/// all resolve to `None`; callers cannot tell the cases apart.
pub(crate) fn resolve(headers: &HeaderMap, codec: &TokenCodec, now: i64) -> Option<i32> {
    let token = cookie::extract(headers)?;
    let claims = codec.verify(&token, now)?;

    Some(claims.id)
}

/// Middleware for personalizable routes: always lets the request through,
/// recording the resolved session in the request extensions.
pub(crate) async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response<Body> {
    let session = resolve(request.headers(), &state.tokens, Utc::now().timestamp());

    request.extensions_mut().insert(Session(session));

    next.run(request).await
}

/// Middleware for protected routes: rejects anonymous callers before the
/// handler runs.
pub(crate) async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    match resolve(request.headers(), &state.tokens, Utc::now().timestamp()) {
        Some(id) => {
            request.extensions_mut().insert(UserId(id));

            Ok(next.run(request).await)
        }
        None => Err(Error::AuthenticationRequired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    use crate::utils::token::TOKEN_TTL_SECS;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret")
    }

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    /// Simulates a browser storing a Set-Cookie header and replaying it.
    fn replay(set_cookie: &str) -> HeaderMap {
        headers_with_cookie(set_cookie.split(';').next().unwrap())
    }

    #[test]
    fn test_resolve_without_cookie() {
        assert_eq!(resolve(&HeaderMap::new(), &codec(), 1000), None);
    }

    #[test]
    fn test_resolve_garbage_token() {
        let headers = headers_with_cookie("token=not-a-token");

        assert_eq!(resolve(&headers, &codec(), 1000), None);
    }

    #[test]
    fn test_resolve_valid_session_end_to_end() {
        let codec = codec();
        let token = codec.mint(42, 1000).unwrap();
        let headers = replay(&cookie::set_header(&token, false));

        assert_eq!(resolve(&headers, &codec, 1000), Some(42));
        assert_eq!(resolve(&headers, &codec, 1000 + TOKEN_TTL_SECS), None);
    }

    #[test]
    fn test_resolve_after_logout() {
        let codec = codec();
        let headers = replay(&cookie::clear_header(false));

        assert_eq!(resolve(&headers, &codec, 1000), None);
    }

    #[test]
    fn test_resolve_with_foreign_secret() {
        let token = TokenCodec::new("someone-elses-secret")
            .mint(42, 1000)
            .unwrap();
        let headers = replay(&cookie::set_header(&token, false));

        assert_eq!(resolve(&headers, &codec(), 1000), None);
    }
}
