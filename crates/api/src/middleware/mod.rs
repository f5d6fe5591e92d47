//! Request authentication and authorization.
//!
//! - [`auth::authenticate`] -- Resolves the bearer token on every API request
//!   into an [`auth::Identity`] stored in the request extensions.
//! - [`auth::CurrentIdentity`] / [`auth::RequireAuth`] -- Extractors reading
//!   that identity.
//! - [`ownership::authorize_workout_mutation`] -- Owner check for workout writes.

pub mod auth;
pub mod ownership;
