use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::middleware::{self, AuthState};

pub mod common;
pub mod lists;
pub mod login;
pub mod system;

/// Router for login plus every guarded endpoint.
///
/// Read routes sit behind `auth_required`; every list mutation sits behind
/// `admin_required`. The guards are route layers, so unmatched paths still
/// answer 404 rather than 401.
pub fn router(auth: AuthState) -> Router {
    let readers = Router::new()
        .route("/whoami", get(system::whoami))
        .merge(lists::reader_routes())
        .route_layer(from_fn_with_state(auth.clone(), middleware::auth_required));

    let writers = lists::writer_routes()
        .route_layer(from_fn_with_state(auth, middleware::admin_required));

    Router::new()
        .route("/login", post(login::login))
        .merge(readers)
        .merge(writers)
}
