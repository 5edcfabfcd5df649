use std::sync::Arc;

use axum::{body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::app::dto::{LoginRequest, LoginResponse};
use crate::app::errors;
use crate::app::services::AppServices;

/// `POST /login`: exchange a username/password pair for a session token.
///
/// Exactly one response is written: 200 with the token, or 401 for an
/// undecodable body, unknown user, or wrong password.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    let req: LoginRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("login rejected: undecodable body: {e}");
            return unauthorized();
        }
    };

    let Some(user) = services.credentials.verify(&req.username, &req.password) else {
        tracing::warn!(username = %req.username, "login rejected: bad credentials");
        return unauthorized();
    };

    let session = services.sessions.create(&user.username, Utc::now());
    tracing::info!(
        username = %session.username,
        expires_at = %session.expires_at,
        "session issued"
    );

    (
        StatusCode::OK,
        Json(LoginResponse {
            token: session.token.into_string(),
        }),
    )
        .into_response()
}

fn unauthorized() -> axum::response::Response {
    errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "unauthorized")
}
