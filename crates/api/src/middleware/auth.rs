//! Bearer-token authentication gate and identity extractors.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::{AUTHORIZATION, VARY, WWW_AUTHENTICATE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use fitlog_core::authorization::AUTHENTICATION_REQUIRED_MESSAGE;
use fitlog_core::error::CoreError;
use fitlog_core::tokens::{hash_token, scopes};
use fitlog_db::models::user::UserResponse;
use fitlog_db::repositories::TokenRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Message for an `Authorization` header that is not `Bearer <token>`.
pub const MALFORMED_HEADER_MESSAGE: &str = "malformed authorization header";

/// Message for a well-formed token that is unknown, expired or wrongly scoped.
pub const INVALID_TOKEN_MESSAGE: &str = "invalid or expired token";

/// Who is making the request.
///
/// Inserted into the request extensions by [`authenticate`] before any
/// handler runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    /// No `Authorization` header was presented.
    Anonymous,
    /// A valid authentication token resolved to this user.
    User(UserResponse),
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }
}

/// Unwrap an identity into its user, or fail with 401 for anonymous callers.
pub fn require_authenticated(identity: Identity) -> Result<UserResponse, CoreError> {
    match identity {
        Identity::User(user) => Ok(user),
        Identity::Anonymous => Err(CoreError::Unauthorized(
            AUTHENTICATION_REQUIRED_MESSAGE.to_string(),
        )),
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The value must be exactly two space-separated parts: the scheme `Bearer`
/// and a non-empty token.
pub fn parse_bearer(value: &HeaderValue) -> Result<&str, CoreError> {
    let malformed = || CoreError::Unauthorized(MALFORMED_HEADER_MESSAGE.to_string());

    let value = value.to_str().map_err(|_| malformed())?;
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(malformed()),
    }
}

/// Axum middleware resolving the caller's [`Identity`].
///
/// A missing header yields [`Identity::Anonymous`]. A malformed header or a
/// token with no live row in the `authentication` scope is rejected with 401
/// and the handler never runs. Every response carries `Vary: Authorization`.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let mut response = match resolve_identity(&state, req.headers()).await {
        Ok(identity) => {
            if let Identity::User(user) = &identity {
                tracing::debug!(user_id = user.id, "Request authenticated");
            }
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(err) => {
            let mut response = err.into_response();
            if response.status() == StatusCode::UNAUTHORIZED {
                response
                    .headers_mut()
                    .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
            }
            response
        }
    };

    response
        .headers_mut()
        .append(VARY, HeaderValue::from_static("Authorization"));
    response
}

async fn resolve_identity(state: &AppState, headers: &HeaderMap) -> AppResult<Identity> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(Identity::Anonymous);
    };
    let token = parse_bearer(value)?;

    let user = TokenRepo::find_user_for_token(&state.pool, scopes::AUTHENTICATION, &hash_token(token))
        .await?
        .ok_or_else(|| CoreError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string()))?;

    Ok(Identity::User(user.into()))
}

/// The identity attached by [`authenticate`], anonymous or not.
///
/// ```ignore
/// async fn handler(CurrentIdentity(identity): CurrentIdentity) -> AppResult<Json<()>> {
///     if identity.is_anonymous() { /* ... */ }
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or_else(|| {
                AppError::Core(CoreError::Internal("request identity missing".into()))
            })
    }
}

/// Requires an authenticated user. Rejects anonymous callers with 401.
///
/// ```ignore
/// async fn any_authed(RequireAuth(user): RequireAuth) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub UserResponse);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentIdentity(identity) = CurrentIdentity::from_request_parts(parts, state).await?;
        Ok(RequireAuth(require_authenticated(identity)?))
    }
}
