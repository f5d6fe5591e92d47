//! Workout aggregate constants and validation.
//!
//! The database enforces the same entry checks as table constraints; these
//! functions exist so callers get a 400 with a readable message instead of a
//! constraint violation.

use crate::error::CoreError;

/// Maximum number of entries a single workout may carry.
pub const MAX_ENTRIES_PER_WORKOUT: usize = 100;

/// Borrowed view of the fields of an entry that validation looks at.
#[derive(Debug, Clone, Copy)]
pub struct EntryFields<'a> {
    pub exercise_name: &'a str,
    pub sets: i32,
    pub reps: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub weight: Option<f64>,
    pub order_index: Option<i32>,
}

/// Validate the scalar fields of a workout.
pub fn validate_workout_fields(
    title: &str,
    duration_minutes: i32,
    calories_burned: i32,
) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title is required".to_string()));
    }
    if duration_minutes < 0 {
        return Err(CoreError::Validation(
            "duration_minutes must not be negative".to_string(),
        ));
    }
    if calories_burned < 0 {
        return Err(CoreError::Validation(
            "calories_burned must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// Validate a single entry. `position` is only used in error messages.
///
/// An entry is either rep-based or time-based: exactly one of `reps` and
/// `duration_seconds` must be set.
pub fn validate_entry(position: usize, entry: &EntryFields<'_>) -> Result<(), CoreError> {
    let fail = |msg: &str| Err(CoreError::Validation(format!("entry {position}: {msg}")));

    if entry.exercise_name.trim().is_empty() {
        return fail("exercise_name is required");
    }
    if entry.sets <= 0 {
        return fail("sets must be greater than zero");
    }
    match (entry.reps, entry.duration_seconds) {
        (Some(_), Some(_)) => return fail("set either reps or duration_seconds, not both"),
        (None, None) => return fail("one of reps or duration_seconds is required"),
        _ => {}
    }
    if entry.reps.is_some_and(|r| r < 0) {
        return fail("reps must not be negative");
    }
    if entry.duration_seconds.is_some_and(|d| d < 0) {
        return fail("duration_seconds must not be negative");
    }
    if let Some(weight) = entry.weight {
        if !weight.is_finite() || weight < 0.0 {
            return fail("weight must be a non-negative number");
        }
    }
    if entry.order_index.is_some_and(|i| i < 0) {
        return fail("order_index must not be negative");
    }
    Ok(())
}

/// Validate a full entry list (count plus every entry).
pub fn validate_entries<'a, I>(entries: I) -> Result<(), CoreError>
where
    I: ExactSizeIterator<Item = EntryFields<'a>>,
{
    if entries.len() > MAX_ENTRIES_PER_WORKOUT {
        return Err(CoreError::Validation(format!(
            "a workout may have at most {MAX_ENTRIES_PER_WORKOUT} entries"
        )));
    }
    for (position, entry) in entries.enumerate() {
        validate_entry(position, &entry)?;
    }
    Ok(())
}

/// The order index persisted for an entry: the supplied one if present,
/// otherwise the entry's position in the submitted list.
pub fn resolve_order_index(position: usize, supplied: Option<i32>) -> i32 {
    supplied.unwrap_or_else(|| i32::try_from(position).unwrap_or(i32::MAX))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn reps_entry(name: &str) -> EntryFields<'_> {
        EntryFields {
            exercise_name: name,
            sets: 3,
            reps: Some(10),
            duration_seconds: None,
            weight: Some(60.0),
            order_index: None,
        }
    }

    #[test]
    fn test_valid_workout_fields() {
        assert!(validate_workout_fields("Leg day", 45, 300).is_ok());
        assert!(validate_workout_fields("Rest", 0, 0).is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        assert_matches!(
            validate_workout_fields("   ", 10, 10),
            Err(CoreError::Validation(msg)) if msg.contains("title")
        );
    }

    #[test]
    fn test_negative_totals_rejected() {
        assert!(validate_workout_fields("x", -1, 0).is_err());
        assert!(validate_workout_fields("x", 0, -5).is_err());
    }

    #[test]
    fn test_rep_and_time_entries_are_valid() {
        assert!(validate_entry(0, &reps_entry("Squat")).is_ok());

        let plank = EntryFields {
            exercise_name: "Plank",
            sets: 1,
            reps: None,
            duration_seconds: Some(60),
            weight: None,
            order_index: Some(2),
        };
        assert!(validate_entry(1, &plank).is_ok());
    }

    #[test]
    fn test_zero_weight_is_distinct_from_unset() {
        let mut entry = reps_entry("Push up");
        entry.weight = Some(0.0);
        assert!(validate_entry(0, &entry).is_ok());
        entry.weight = None;
        assert!(validate_entry(0, &entry).is_ok());
    }

    #[test]
    fn test_entry_needs_exactly_one_of_reps_or_duration() {
        let mut entry = reps_entry("Row");
        entry.duration_seconds = Some(30);
        assert_matches!(
            validate_entry(4, &entry),
            Err(CoreError::Validation(msg)) if msg.starts_with("entry 4:")
        );

        entry.reps = None;
        entry.duration_seconds = None;
        assert!(validate_entry(0, &entry).is_err());
    }

    #[test]
    fn test_entry_field_bounds() {
        let mut entry = reps_entry("");
        assert!(validate_entry(0, &entry).is_err());

        entry = reps_entry("Deadlift");
        entry.sets = 0;
        assert!(validate_entry(0, &entry).is_err());

        entry = reps_entry("Deadlift");
        entry.weight = Some(f64::NAN);
        assert!(validate_entry(0, &entry).is_err());

        entry = reps_entry("Deadlift");
        entry.order_index = Some(-1);
        assert!(validate_entry(0, &entry).is_err());
    }

    #[test]
    fn test_entry_count_limit() {
        let too_many = vec![reps_entry("Curl"); MAX_ENTRIES_PER_WORKOUT + 1];
        assert!(validate_entries(too_many.into_iter()).is_err());

        let fine = vec![reps_entry("Curl"); MAX_ENTRIES_PER_WORKOUT];
        assert!(validate_entries(fine.into_iter()).is_ok());
    }

    #[test]
    fn test_resolve_order_index() {
        assert_eq!(resolve_order_index(0, None), 0);
        assert_eq!(resolve_order_index(7, None), 7);
        assert_eq!(resolve_order_index(7, Some(2)), 2);
    }
}
