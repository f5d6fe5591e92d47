use crate::types::DbId;

/// Domain error taxonomy.
///
/// `Unauthorized` is the authentication failure (missing, malformed, invalid
/// or expired credentials); `Forbidden` is the authorization failure (the
/// caller is known but may not touch the resource).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
