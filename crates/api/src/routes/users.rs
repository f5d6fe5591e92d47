//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /        -> register_user
/// GET  /self    -> get_self (requires auth)
/// GET  /{id}    -> get_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register_user))
        .route("/self", get(users::get_self))
        .route("/{id}", get(users::get_user))
}
