use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use listkeep_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", "List not found"),
        // A non-canonical id cannot name any stored list.
        DomainError::InvalidId(_) => json_error(StatusCode::NOT_FOUND, "not_found", "List not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
