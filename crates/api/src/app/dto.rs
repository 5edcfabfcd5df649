use axum::body::Bytes;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use listkeep_auth::Role;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PushItemRequest {
    #[serde(default)]
    pub item: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub username: String,
    pub role: Role,
}

// -------------------------
// Body decoding
// -------------------------

/// Decode a JSON request body, answering `status` with the decoder's message
/// on failure.
///
/// Bodies are decoded by hand rather than through `axum::Json` so each route
/// picks its own failure status and no `Content-Type` is required.
pub fn decode_json<T: DeserializeOwned>(
    body: &Bytes,
    status: StatusCode,
    code: &'static str,
) -> Result<T, axum::response::Response> {
    serde_json::from_slice(body).map_err(|e| errors::json_error(status, code, e.to_string()))
}
