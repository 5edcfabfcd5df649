//! Access-control chain.
//!
//! `auth_required` admits any caller holding a live session; `admin_required`
//! runs the same check and then demands the admin role. Both short-circuit:
//! on rejection the inner handler (and its body decoding) never runs.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use thiserror::Error;

use listkeep_auth::{authorize_role, Role, SessionRegistry, User};

use crate::app::errors;
use crate::context::CallerContext;

#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<SessionRegistry>,
}

/// Why a request carried no usable bearer token.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BearerError {
    #[error("missing Authorization header")]
    Missing,

    #[error("Authorization header is not visible ASCII")]
    NotVisibleAscii,

    #[error("Authorization header does not use the Bearer scheme")]
    WrongScheme,

    #[error("empty bearer token")]
    Empty,
}

pub async fn auth_required(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let user = authenticate(&state, req.headers())?;

    req.extensions_mut().insert(CallerContext::from(&user));
    Ok(next.run(req).await)
}

pub async fn admin_required(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let user = authenticate(&state, req.headers())?;

    if let Err(e) = authorize_role(&user, Role::Admin) {
        tracing::debug!(path = %req.uri().path(), "request rejected: {e}");
        return Err(errors::json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden"));
    }

    req.extensions_mut().insert(CallerContext::from(&user));
    Ok(next.run(req).await)
}

fn authenticate(state: &AuthState, headers: &HeaderMap) -> Result<User, Response> {
    let token = extract_bearer(headers).map_err(|e| {
        tracing::debug!("request rejected: {e}");
        unauthenticated()
    })?;

    state.sessions.resolve_user(token, Utc::now()).ok_or_else(|| {
        tracing::debug!("request rejected: unknown or expired session");
        unauthenticated()
    })
}

fn unauthenticated() -> Response {
    errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "unauthorized")
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme marker must be followed by exactly one separator character;
/// everything after it is the token, untrimmed.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?;

    let header = header.to_str().map_err(|_| BearerError::NotVisibleAscii)?;

    let rest = header.strip_prefix("Bearer").ok_or(BearerError::WrongScheme)?;

    let mut chars = rest.chars();
    chars.next().ok_or(BearerError::Empty)?;
    let token = chars.as_str();
    if token.is_empty() {
        return Err(BearerError::Empty);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use axum::http::{header::AUTHORIZATION, HeaderValue};

    use super::*;

    fn headers(value: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_static(value));
        h
    }

    #[test]
    fn extracts_token_after_single_separator() {
        assert_eq!(extract_bearer(&headers("Bearer 12345")), Ok("12345"));
    }

    #[test]
    fn extra_separator_becomes_part_of_token() {
        assert_eq!(extract_bearer(&headers("Bearer  12345")), Ok(" 12345"));
    }

    #[test]
    fn missing_header_is_rejected() {
        assert_eq!(extract_bearer(&HeaderMap::new()), Err(BearerError::Missing));
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert_eq!(extract_bearer(&headers("Basic abc")), Err(BearerError::WrongScheme));
        assert_eq!(extract_bearer(&headers("bearer 123")), Err(BearerError::WrongScheme));
        assert_eq!(extract_bearer(&headers("123")), Err(BearerError::WrongScheme));
    }

    #[test]
    fn bare_scheme_is_empty() {
        assert_eq!(extract_bearer(&headers("Bearer")), Err(BearerError::Empty));
        assert_eq!(extract_bearer(&headers("Bearer ")), Err(BearerError::Empty));
    }
}
