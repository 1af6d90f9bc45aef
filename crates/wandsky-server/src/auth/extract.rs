use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;

use super::session::{SessionClaims, SessionKeys, SESSION_COOKIE};
use crate::api::{ApiError, AppState};
use crate::middleware::extract_bearer_token;

/// Session JWT candidates: the cookie first, then `Authorization: Bearer`.
fn session_tokens(headers: &HeaderMap) -> impl Iterator<Item = String> + '_ {
    let cookie = CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty());
    let bearer = extract_bearer_token(headers.get(header::AUTHORIZATION)).map(str::to_owned);
    cookie.into_iter().chain(bearer)
}

/// First carrier that decodes to a valid session. A stale cookie does not
/// hide a valid bearer token.
pub(crate) fn decode_session(headers: &HeaderMap, sessions: &SessionKeys) -> Option<SessionClaims> {
    session_tokens(headers).find_map(|token| sessions.decode(&token))
}

/// The caller's session if one is present and valid. Never rejects.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<SessionClaims>);

impl MaybeSession {
    /// Backend token, when signed in with one.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.0.as_ref().and_then(|c| c.access_token.as_deref())
    }
}

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(decode_session(&parts.headers, &state.sessions)))
    }
}

/// A signed-in caller holding a backend access token.
///
/// Rejects with 401 when there is no session or the session carries no
/// access token.
#[derive(Debug, Clone)]
pub struct RequireSession {
    pub claims: SessionClaims,
    pub access_token: String,
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(MaybeSession(claims)) = MaybeSession::from_request_parts(parts, state).await;
        let claims = claims.ok_or_else(ApiError::unauthorized)?;
        let access_token = claims
            .access_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(ApiError::unauthorized)?;
        Ok(Self {
            claims,
            access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::auth::session::SignedInUser;

    fn keys() -> SessionKeys {
        SessionKeys::new("0123456789abcdef0123456789abcdef", 3600, false)
    }

    fn signed_token(keys: &SessionKeys, id: &str) -> String {
        let user = SignedInUser {
            id: Some(id.to_owned()),
            email: Some(format!("{id}@example.nz")),
            name: None,
            image: None,
            access_token: Some(format!("backend-{id}")),
        };
        keys.issue(user, None).expect("token").1
    }

    fn first_token(headers: &HeaderMap) -> Option<String> {
        session_tokens(headers).next()
    }

    #[test]
    fn cookie_takes_precedence_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; wandsky.session-token=from-cookie"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(first_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn bearer_header_is_accepted_without_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(first_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn no_carrier_means_no_token() {
        assert!(first_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn valid_cookie_wins_over_valid_bearer() {
        let keys = keys();
        let mut headers = HeaderMap::new();
        let cookie = format!("{SESSION_COOKIE}={}", signed_token(&keys, "cookie-user"));
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).expect("header"));
        let bearer = format!("Bearer {}", signed_token(&keys, "bearer-user"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&bearer).expect("header"));

        let claims = decode_session(&headers, &keys).expect("session");
        assert_eq!(claims.user_id.as_deref(), Some("cookie-user"));
    }

    #[test]
    fn stale_cookie_falls_back_to_bearer() {
        let keys = keys();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("wandsky.session-token=expired-or-garbage"),
        );
        let bearer = format!("Bearer {}", signed_token(&keys, "bearer-user"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&bearer).expect("header"));

        let claims = decode_session(&headers, &keys).expect("session");
        assert_eq!(claims.user_id.as_deref(), Some("bearer-user"));
    }
}
