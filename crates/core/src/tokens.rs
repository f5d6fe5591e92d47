//! Opaque bearer-token generation and hashing.
//!
//! A token is 32 bytes from the operating system CSPRNG, handed to the client
//! as URL-safe base64. Only the SHA-256 digest of that string is ever stored,
//! so a database leak does not expose usable credentials. The secret already
//! carries 256 bits of entropy, so a fast digest is enough here; password
//! hashing is a different concern and lives in the API crate.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::CoreError;
use crate::hashing::sha256;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of random bytes in a token secret.
pub const TOKEN_BYTES: usize = 32;

/// Length of the encoded plaintext (`ceil(32 * 4 / 3)` without padding).
pub const TOKEN_PLAINTEXT_LENGTH: usize = 43;

/// Default lifetime of an authentication token in hours.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Known token scopes.
pub mod scopes {
    /// Tokens exchanged for credentials at login and presented as `Bearer`.
    pub const AUTHENTICATION: &str = "authentication";
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// A freshly generated token.
pub struct GeneratedToken {
    /// The plaintext secret (returned to the caller once, never stored).
    pub plaintext: String,
    /// SHA-256 digest of the plaintext (the only persisted form).
    pub hash: Vec<u8>,
}

impl std::fmt::Debug for GeneratedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedToken")
            .field("plaintext", &"<redacted>")
            .field("hash_len", &self.hash.len())
            .finish()
    }
}

/// Generate a new random token.
///
/// Fails with [`CoreError::Internal`] if the OS random source is unavailable.
pub fn generate_token() -> Result<GeneratedToken, CoreError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CoreError::Internal(format!("Random token generation failed: {e}")))?;

    let plaintext = URL_SAFE_NO_PAD.encode(bytes);
    let hash = hash_token(&plaintext);

    Ok(GeneratedToken { plaintext, hash })
}

/// Compute the stored digest of a presented token.
///
/// Used both when issuing (to persist the hash) and when authenticating (to
/// look the token up by hash).
pub fn hash_token(plaintext: &str) -> Vec<u8> {
    sha256(plaintext.as_bytes())
}
