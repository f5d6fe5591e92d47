//! Handlers for `/tokens/authentication` (login and logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fitlog_core::error::CoreError;
use fitlog_core::tokens::scopes;
use fitlog_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::verify_credentials;
use crate::auth::token::{issue_token, revoke_all, IssuedToken};
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::auth::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Returned for both an unknown username and a wrong password.
const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Request body for `POST /tokens/authentication`.
#[derive(Debug, Deserialize)]
pub struct CreateTokenRequest {
    pub username: String,
    pub password: String,
}

/// POST /tokens/authentication
///
/// Exchange username + password for a new authentication token. Earlier
/// tokens for the user remain valid.
pub async fn create_authentication_token(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTokenRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<IssuedToken>>)> {
    let user = UserRepo::find_by_username(&state.pool, &input.username).await?;

    // Unknown usernames still pay for one Argon2 verification.
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let password_valid = verify_credentials(input.password, stored_hash).await?;

    let user = match user {
        Some(user) if password_valid => user,
        Some(_) => {
            tracing::warn!(username = %input.username, "Login failed: wrong password");
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
        }
        None => {
            tracing::warn!(username = %input.username, "Login failed: unknown user");
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
        }
    };

    let issued = issue_token(
        &state.pool,
        user.id,
        state.config.token.ttl(),
        scopes::AUTHENTICATION,
    )
    .await?;

    tracing::info!(user_id = user.id, "Authentication token issued");

    Ok((StatusCode::CREATED, Json(DataResponse { data: issued })))
}

/// DELETE /tokens/authentication
///
/// Revoke every authentication token of the caller. Returns 204 No Content.
pub async fn revoke_authentication_tokens(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<StatusCode> {
    let revoked = revoke_all(&state.pool, user.id, scopes::AUTHENTICATION).await?;
    tracing::info!(user_id = user.id, revoked, "Authentication tokens revoked");
    Ok(StatusCode::NO_CONTENT)
}
