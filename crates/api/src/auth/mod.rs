//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- Opaque bearer-token issuance and revocation.

pub mod password;
pub mod token;
