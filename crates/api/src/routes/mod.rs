pub mod health;
pub mod tokens;
pub mod users;
pub mod workouts;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                      register (public)
/// /users/self                 current user (requires auth)
/// /users/{id}                 public profile
///
/// /tokens/authentication      login (POST, public), logout (DELETE, requires auth)
///
/// /workouts                   list own (GET, requires auth), create (POST, requires auth)
/// /workouts/{id}              get (public), update / delete (owner only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/tokens", tokens::router())
        .nest("/workouts", workouts::router())
}
