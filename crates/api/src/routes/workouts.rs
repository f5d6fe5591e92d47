//! Route definitions for the `/workouts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::workouts;
use crate::state::AppState;

/// Routes mounted at `/workouts`.
///
/// ```text
/// GET    /      -> list_workouts (requires auth)
/// POST   /      -> create_workout (requires auth)
/// GET    /{id}  -> get_workout
/// PUT    /{id}  -> update_workout (owner only)
/// DELETE /{id}  -> delete_workout (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(workouts::list_workouts).post(workouts::create_workout),
        )
        .route(
            "/{id}",
            get(workouts::get_workout)
                .put(workouts::update_workout)
                .delete(workouts::delete_workout),
        )
}
