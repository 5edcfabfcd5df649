//! `/v1/lists` handlers.
//!
//! Routes taking an id look the list up before decoding the body, so a
//! missing list answers 404 whatever the body holds. Decode failures answer
//! 400 on create/replace and 500 on patch/push.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use listkeep_core::DomainError;
use listkeep_lists::{ShoppingList, ShoppingListPatch};

use crate::app::routes::common::parse_list_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

/// Routes open to any authenticated caller.
pub fn reader_routes() -> Router {
    Router::new()
        .route("/v1/lists", get(list_lists))
        .route("/v1/lists/:id", get(get_list))
}

/// Routes restricted to admins.
pub fn writer_routes() -> Router {
    Router::new()
        .route("/v1/lists", post(create_list))
        .route(
            "/v1/lists/:id",
            put(replace_list).patch(patch_list).delete(delete_list),
        )
        .route("/v1/lists/:id/push", post(push_item))
}

pub async fn create_list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    body: Bytes,
) -> axum::response::Response {
    let list: ShoppingList = match dto::decode_json(&body, StatusCode::BAD_REQUEST, "bad_request") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lists.create(list) {
        Ok(list) => {
            tracing::info!(list_id = %list.id, by = caller.username(), "list created");
            (StatusCode::CREATED, Json(list)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_lists(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<ShoppingList>> {
    Json(services.lists.list_all())
}

pub async fn get_list(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lists.get(id) {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn replace_list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !services.lists.contains(id) {
        return errors::domain_error_to_response(DomainError::not_found(id));
    }

    let list: ShoppingList = match dto::decode_json(&body, StatusCode::BAD_REQUEST, "bad_request") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lists.replace(id, list) {
        Ok(list) => {
            tracing::info!(list_id = %id, new_id = %list.id, by = caller.username(), "list replaced");
            (StatusCode::OK, Json(list)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn patch_list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !services.lists.contains(id) {
        return errors::domain_error_to_response(DomainError::not_found(id));
    }

    let patch: ShoppingListPatch =
        match dto::decode_json(&body, StatusCode::INTERNAL_SERVER_ERROR, "internal_error") {
            Ok(v) => v,
            Err(resp) => return resp,
        };

    match services.lists.patch(id, patch) {
        Ok(list) => {
            tracing::info!(list_id = %id, by = caller.username(), "list patched");
            (StatusCode::OK, Json(list)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lists.delete(id) {
        Ok(_) => {
            tracing::info!(list_id = %id, by = caller.username(), "list deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn push_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    let id = match parse_list_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !services.lists.contains(id) {
        return errors::domain_error_to_response(DomainError::not_found(id));
    }

    let push: dto::PushItemRequest =
        match dto::decode_json(&body, StatusCode::INTERNAL_SERVER_ERROR, "internal_error") {
            Ok(v) => v,
            Err(resp) => return resp,
        };

    match services.lists.push(id, push.item) {
        Ok(list) => {
            tracing::info!(list_id = %id, by = caller.username(), "item pushed");
            (StatusCode::OK, Json(list)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
