//! Issuing and revoking opaque bearer tokens.

use chrono::{Duration, Utc};
use fitlog_core::tokens::generate_token;
use fitlog_core::types::{DbId, Timestamp};
use fitlog_db::models::token::CreateToken;
use fitlog_db::repositories::TokenRepo;
use fitlog_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// A token as returned to the client at issuance. The plaintext is only
/// ever available here; afterwards only its hash exists.
#[derive(Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub user_id: DbId,
    pub expiry: Timestamp,
    pub scope: String,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("expiry", &self.expiry)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Generate a token for `user_id`, persist its hash, and return the plaintext.
///
/// Each call adds a row; existing tokens for the user stay valid.
pub async fn issue_token(
    pool: &DbPool,
    user_id: DbId,
    ttl: Duration,
    scope: &str,
) -> AppResult<IssuedToken> {
    let generated = generate_token()?;

    let input = CreateToken {
        hash: generated.hash,
        user_id,
        expiry: Utc::now() + ttl,
        scope: scope.to_string(),
    };
    let stored = TokenRepo::create(pool, &input)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to persist token: {e}")))?;

    Ok(IssuedToken {
        token: generated.plaintext,
        user_id: stored.user_id,
        expiry: stored.expiry,
        scope: stored.scope,
    })
}

/// Delete every token the user holds in `scope`. Returns how many were removed.
pub async fn revoke_all(pool: &DbPool, user_id: DbId, scope: &str) -> AppResult<u64> {
    Ok(TokenRepo::delete_all_for_user(pool, user_id, scope).await?)
}
