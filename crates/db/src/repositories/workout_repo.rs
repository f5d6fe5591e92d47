//! Repository for the workout aggregate (`workouts` + `workout_entries`).
//!
//! Every mutation of the aggregate runs in a single transaction. A
//! `sqlx::Transaction` rolls back when dropped without `commit`, so any early
//! return through `?` (or a cancelled request future) leaves the previously
//! committed state untouched. Reads that span both tables run in a
//! `REPEATABLE READ` snapshot so the root row and its entries always come
//! from the same committed state.

use std::collections::HashMap;

use fitlog_core::types::DbId;
use fitlog_core::workout::resolve_order_index;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::workout::{CreateWorkout, CreateWorkoutEntry, UpdateWorkout, Workout, WorkoutEntry};

/// Column list for `workouts` queries.
const WORKOUT_COLUMNS: &str = "id, user_id, title, description, duration_minutes, \
    calories_burned, created_at, updated_at";

/// Column list for `workout_entries` queries.
const ENTRY_COLUMNS: &str = "id, workout_id, exercise_name, sets, reps, duration_seconds, \
    weight, notes, order_index";

/// Provides atomic persistence for workouts and their ordered entries.
pub struct WorkoutRepo;

impl WorkoutRepo {
    /// Insert a workout and all of its entries in one transaction.
    ///
    /// Each entry is stored with its supplied `order_index`, or its position
    /// in `input.entries` when none was supplied. If any entry insert fails
    /// nothing is committed.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateWorkout,
    ) -> Result<Workout, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO workouts (user_id, title, description, duration_minutes, calories_burned)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {WORKOUT_COLUMNS}"
        );
        let workout = sqlx::query_as::<_, Workout>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration_minutes)
            .bind(input.calories_burned)
            .fetch_one(&mut *tx)
            .await?;

        let entries = Self::insert_entries(&mut tx, workout.id, &input.entries).await?;

        tx.commit().await?;
        Ok(Workout { entries, ..workout })
    }

    /// Load a workout with its entries ordered by `order_index`.
    ///
    /// Returns `None` if no workout with the given id exists.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Workout>, sqlx::Error> {
        let mut tx = Self::begin_snapshot(pool).await?;

        let query = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = $1");
        let Some(workout) = sqlx::query_as::<_, Workout>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM workout_entries
             WHERE workout_id = $1
             ORDER BY order_index ASC, id ASC"
        );
        let entries = sqlx::query_as::<_, WorkoutEntry>(&query)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(Workout { entries, ..workout }))
    }

    /// Replace a workout's scalar fields and its complete entry set.
    ///
    /// Runs in one transaction: update the root row (absent fields keep
    /// their value), delete every existing entry, then insert `entries` with
    /// freshly generated ids. Returns `None` if the workout does not exist;
    /// in that case nothing was changed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkout,
        entries: &[CreateWorkoutEntry],
    ) -> Result<Option<Workout>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE workouts SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                duration_minutes = COALESCE($4, duration_minutes),
                calories_burned = COALESCE($5, calories_burned)
             WHERE id = $1
             RETURNING {WORKOUT_COLUMNS}"
        );
        let Some(workout) = sqlx::query_as::<_, Workout>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration_minutes)
            .bind(input.calories_burned)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let removed = sqlx::query("DELETE FROM workout_entries WHERE workout_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let entries = Self::insert_entries(&mut tx, id, entries).await?;

        tx.commit().await?;
        tracing::debug!(
            workout_id = id,
            removed,
            inserted = entries.len(),
            "Workout entries replaced"
        );
        Ok(Some(Workout { entries, ..workout }))
    }

    /// Delete a workout. Entries are removed by the `ON DELETE CASCADE`
    /// foreign key. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all workouts owned by a user, ordered by id, each with its entries.
    ///
    /// Entries for every workout are fetched with one batched query and
    /// grouped by `workout_id`.
    pub async fn list_by_owner(pool: &PgPool, user_id: DbId) -> Result<Vec<Workout>, sqlx::Error> {
        let mut tx = Self::begin_snapshot(pool).await?;

        let query = format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts
             WHERE user_id = $1
             ORDER BY id ASC"
        );
        let workouts = sqlx::query_as::<_, Workout>(&query)
            .bind(user_id)
            .fetch_all(&mut *tx)
            .await?;

        if workouts.is_empty() {
            tx.commit().await?;
            return Ok(workouts);
        }

        let ids: Vec<DbId> = workouts.iter().map(|w| w.id).collect();
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM workout_entries
             WHERE workout_id = ANY($1)
             ORDER BY workout_id ASC, order_index ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, WorkoutEntry>(&query)
            .bind(&ids[..])
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut entries_by_workout: HashMap<DbId, Vec<WorkoutEntry>> = HashMap::new();
        for entry in rows {
            entries_by_workout
                .entry(entry.workout_id)
                .or_default()
                .push(entry);
        }

        Ok(workouts
            .into_iter()
            .map(|w| {
                let entries = entries_by_workout.remove(&w.id).unwrap_or_default();
                Workout { entries, ..w }
            })
            .collect())
    }

    /// Look up the owning user of a workout.
    ///
    /// This is the only query that reads `workouts.user_id` for authorization
    /// purposes. Returns `None` if the workout does not exist.
    pub async fn owner_of(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT user_id FROM workouts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Open a read-only transaction with a single snapshot for all statements.
    async fn begin_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Insert entries for a workout within an existing transaction.
    ///
    /// Each insert returns its stored row; the result is sorted the same way
    /// reads order entries.
    async fn insert_entries(
        tx: &mut Transaction<'_, Postgres>,
        workout_id: DbId,
        entries: &[CreateWorkoutEntry],
    ) -> Result<Vec<WorkoutEntry>, sqlx::Error> {
        let query = format!(
            "INSERT INTO workout_entries
                (workout_id, exercise_name, sets, reps, duration_seconds, weight, notes, order_index)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {ENTRY_COLUMNS}"
        );

        let mut inserted = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            let row = sqlx::query_as::<_, WorkoutEntry>(&query)
                .bind(workout_id)
                .bind(&entry.exercise_name)
                .bind(entry.sets)
                .bind(entry.reps)
                .bind(entry.duration_seconds)
                .bind(entry.weight)
                .bind(&entry.notes)
                .bind(resolve_order_index(position, entry.order_index))
                .fetch_one(&mut **tx)
                .await?;
            inserted.push(row);
        }

        inserted.sort_by_key(|e| (e.order_index, e.id));
        Ok(inserted)
    }
}
