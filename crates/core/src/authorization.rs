//! Ownership-based authorization predicates.
//!
//! Callers must pass the owner id as read from the store, never a value
//! taken from the request payload.

use crate::error::CoreError;
use crate::types::DbId;

/// Message used for every ownership failure so responses do not vary by
/// resource type.
pub const FORBIDDEN_MESSAGE: &str = "forbidden";

/// Message used when an anonymous caller reaches a protected operation.
pub const AUTHENTICATION_REQUIRED_MESSAGE: &str = "authentication required";

/// Fail with [`CoreError::Forbidden`] unless `user_id` owns the resource.
pub fn require_ownership(user_id: DbId, owner_id: DbId) -> Result<(), CoreError> {
    if user_id == owner_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(FORBIDDEN_MESSAGE.to_string()))
    }
}
