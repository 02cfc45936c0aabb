//! Authentication ports.

use crate::domain::CallerIdentity;

/// Token service trait for issuing and verifying identity tokens.
pub trait TokenService: Send + Sync {
    /// Issue a signed token for the given identity.
    fn issue(&self, identity: &CallerIdentity) -> Result<String, AuthError>;

    /// Verify a token and decode the identity it carries.
    fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError>;

    /// Lifetime of issued tokens, in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}
