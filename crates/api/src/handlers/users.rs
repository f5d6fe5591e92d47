//! Handlers for the `/users` resource (registration and profiles).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fitlog_core::error::CoreError;
use fitlog_db::models::user::{CreateUser, UserResponse};
use fitlog_db::repositories::UserRepo;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::auth::password::hash_password_blocking;
use crate::error::{unique_violation, AppError, AppResult};
use crate::extract::{IdPath, JsonBody};
use crate::middleware::auth::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 3, max = 10, message = "username must be 3 to 10 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(default)]
    pub bio: String,
}

/// Flatten validator output into one deterministic message.
pub(crate) fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Conflict for a violated user uniqueness constraint, naming the field a
/// client should change.
pub(crate) fn user_conflict(constraint: &str) -> Option<CoreError> {
    let field = match constraint {
        "uq_users_username" => "username",
        "uq_users_email" => "email",
        _ => return None,
    };
    Some(CoreError::Conflict(format!(
        "a user with that {field} already exists"
    )))
}

/// POST /users
///
/// Register a new user. The password is hashed before it reaches the store;
/// the response never includes it. Duplicate username or email is a 409.
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(validation_message(&e)))?;

    let password_hash = hash_password_blocking(input.password).await?;

    let create = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
        bio: input.bio,
    };
    let user = UserRepo::create(&state.pool, &create)
        .await
        .map_err(|e| match unique_violation(&e).and_then(user_conflict) {
            Some(conflict) => AppError::from(conflict),
            None => AppError::from(e),
        })?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: user.into() }),
    ))
}

/// GET /users/self
///
/// Profile of the authenticated caller.
pub async fn get_self(RequireAuth(user): RequireAuth) -> Json<DataResponse<UserResponse>> {
    Json(DataResponse { data: user })
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(Json(DataResponse { data: user.into() }))
}
