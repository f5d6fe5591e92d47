//! Repository for the `tokens` table.
//!
//! Rows are keyed by the SHA-256 of the token secret. Lookups always filter
//! on scope and expiry in SQL so an expired or wrongly scoped token never
//! leaves the database.

use fitlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::token::{CreateToken, Token};
use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "hash, user_id, expiry, scope, created_at";

/// Provides insert, lookup and revocation for bearer tokens.
pub struct TokenRepo;

impl TokenRepo {
    /// Insert a token row, returning it.
    pub async fn create(pool: &PgPool, input: &CreateToken) -> Result<Token, sqlx::Error> {
        let query = format!(
            "INSERT INTO tokens (hash, user_id, expiry, scope)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Token>(&query)
            .bind(&input.hash)
            .bind(input.user_id)
            .bind(input.expiry)
            .bind(&input.scope)
            .fetch_one(pool)
            .await
    }

    /// Resolve the owner of a live token.
    ///
    /// Returns `None` when no row matches the hash and scope, or when the
    /// matching row has `expiry <= NOW()`.
    pub async fn find_user_for_token(
        pool: &PgPool,
        scope: &str,
        hash: &[u8],
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.email, u.password_hash, u.bio,
                    u.created_at, u.updated_at
             FROM users u
             INNER JOIN tokens t ON t.user_id = u.id
             WHERE t.hash = $1
               AND t.scope = $2
               AND t.expiry > NOW()",
        )
        .bind(hash)
        .bind(scope)
        .fetch_optional(pool)
        .await
    }

    /// List every stored token for a user in a scope, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        scope: &str,
    ) -> Result<Vec<Token>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tokens
             WHERE user_id = $1 AND scope = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Token>(&query)
            .bind(user_id)
            .bind(scope)
            .fetch_all(pool)
            .await
    }

    /// Delete all tokens for a user in a scope. Returns the count of deleted rows.
    pub async fn delete_all_for_user(
        pool: &PgPool,
        user_id: DbId,
        scope: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tokens WHERE user_id = $1 AND scope = $2")
            .bind(user_id)
            .bind(scope)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
