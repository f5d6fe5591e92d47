//! Bearer token rows.

use fitlog_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `tokens` table. `hash` is the SHA-256 of the plaintext
/// secret; the plaintext itself is never stored.
#[derive(Debug, Clone, FromRow)]
pub struct Token {
    pub hash: Vec<u8>,
    pub user_id: DbId,
    pub expiry: Timestamp,
    pub scope: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a token row.
#[derive(Debug)]
pub struct CreateToken {
    pub hash: Vec<u8>,
    pub user_id: DbId,
    pub expiry: Timestamp,
    pub scope: String,
}
