use axum::{extract::Extension, http::StatusCode, Json};

use crate::app::dto::WhoAmIResponse;
use crate::context::CallerContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(caller): Extension<CallerContext>) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse {
        username: caller.username().to_string(),
        role: caller.role(),
    })
}
