//! Handlers for the `/workouts` resource.
//!
//! Creation and listing are scoped to the authenticated caller. Reads by id
//! are public. Updates and deletes pass the ownership guard first.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fitlog_core::error::CoreError;
use fitlog_core::types::DbId;
use fitlog_core::workout::{validate_entries, validate_workout_fields};
use fitlog_db::models::workout::{CreateWorkout, CreateWorkoutEntry, UpdateWorkout, Workout};
use fitlog_db::repositories::WorkoutRepo;

use crate::error::AppResult;
use crate::extract::{IdPath, JsonBody};
use crate::middleware::auth::RequireAuth;
use crate::middleware::ownership::authorize_workout_mutation;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Workout",
        id,
    }
}

/// POST /workouts
///
/// Any `user_id` in the body is ignored; the caller becomes the owner.
pub async fn create_workout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    JsonBody(input): JsonBody<CreateWorkout>,
) -> AppResult<(StatusCode, Json<DataResponse<Workout>>)> {
    validate_workout_fields(&input.title, input.duration_minutes, input.calories_burned)?;
    validate_entries(input.entries.iter().map(CreateWorkoutEntry::fields))?;

    let workout = WorkoutRepo::create(&state.pool, user.id, &input).await?;

    tracing::info!(
        user_id = user.id,
        workout_id = workout.id,
        entries = workout.entries.len(),
        "Workout created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: workout })))
}

/// GET /workouts
///
/// All workouts owned by the caller, each with its entries.
pub async fn list_workouts(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Workout>>>> {
    let workouts = WorkoutRepo::list_by_owner(&state.pool, user.id).await?;
    Ok(Json(DataResponse { data: workouts }))
}

/// GET /workouts/{id}
pub async fn get_workout(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<DataResponse<Workout>>> {
    let workout = WorkoutRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: workout }))
}

/// PUT /workouts/{id}
///
/// Omitted scalar fields keep their stored value. The entry list is replaced
/// wholesale; when `workout_entries` is omitted the stored entries are
/// written back unchanged (with new ids).
pub async fn update_workout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    IdPath(id): IdPath,
    JsonBody(mut input): JsonBody<UpdateWorkout>,
) -> AppResult<Json<DataResponse<Workout>>> {
    authorize_workout_mutation(&state.pool, &user, id).await?;

    let existing = WorkoutRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    validate_workout_fields(
        input.title.as_deref().unwrap_or(&existing.title),
        input.duration_minutes.unwrap_or(existing.duration_minutes),
        input.calories_burned.unwrap_or(existing.calories_burned),
    )?;

    let entries: Vec<CreateWorkoutEntry> = match input.workout_entries.take() {
        Some(entries) => entries,
        None => existing.entries.iter().map(CreateWorkoutEntry::from).collect(),
    };
    validate_entries(entries.iter().map(CreateWorkoutEntry::fields))?;

    let workout = WorkoutRepo::update(&state.pool, id, &input, &entries)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        user_id = user.id,
        workout_id = id,
        entries = workout.entries.len(),
        "Workout updated"
    );

    Ok(Json(DataResponse { data: workout }))
}

/// DELETE /workouts/{id}
///
/// Removes the workout and all of its entries. Returns 204 No Content.
pub async fn delete_workout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    authorize_workout_mutation(&state.pool, &user, id).await?;

    if !WorkoutRepo::delete(&state.pool, id).await? {
        return Err(not_found(id).into());
    }

    tracing::info!(user_id = user.id, workout_id = id, "Workout deleted");
    Ok(StatusCode::NO_CONTENT)
}
