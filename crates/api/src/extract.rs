//! Request extractors whose rejections use the API's error envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use fitlog_core::types::DbId;

use crate::error::AppError;

/// JSON body extractor whose rejection is a 400 in the standard
/// `{"error", "code"}` shape rather than axum's plain-text response.
///
/// Malformed JSON, a wrong content type, and a body that does not fit the
/// target type are all reported as `BAD_REQUEST`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection_message(&rejection))),
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "request body must be JSON (Content-Type: application/json)".to_string()
        }
        other => other.body_text(),
    }
}

/// A positive integer `{id}` path segment.
///
/// Anything that does not parse as an id of at least 1 is a 400.
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<DbId>::from_request_parts(parts, state).await {
            Ok(Path(id)) if id >= 1 => Ok(IdPath(id)),
            _ => Err(AppError::BadRequest("invalid id parameter".to_string())),
        }
    }
}
