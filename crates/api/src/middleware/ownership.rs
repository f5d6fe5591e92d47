//! Ownership checks for workout mutations.

use fitlog_core::authorization::require_ownership;
use fitlog_core::error::CoreError;
use fitlog_core::types::DbId;
use fitlog_db::models::user::UserResponse;
use fitlog_db::repositories::WorkoutRepo;
use fitlog_db::DbPool;

use crate::error::AppResult;

/// Allow a mutation of `workout_id` only if `user` owns it.
///
/// The owner is read from the store. Fails with 404 when the workout does
/// not exist and 403 when it belongs to someone else. Must be awaited before
/// the mutation it guards.
pub async fn authorize_workout_mutation(
    pool: &DbPool,
    user: &UserResponse,
    workout_id: DbId,
) -> AppResult<()> {
    let owner_id = WorkoutRepo::owner_of(pool, workout_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Workout",
            id: workout_id,
        })?;

    require_ownership(user.id, owner_id).inspect_err(|_| {
        tracing::warn!(
            user_id = user.id,
            workout_id,
            owner_id,
            "Workout mutation denied"
        );
    })?;

    Ok(())
}
