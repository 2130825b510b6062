//! Authentication ports.

use uuid::Uuid;

/// Identity carried by a verified token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub name: String,
    pub exp: i64,
}

/// Token service trait for issuing and verifying identity tokens.
pub trait TokenService: Send + Sync {
    /// Issue a signed, time-limited token for a user.
    fn issue(&self, user_id: Uuid, name: &str) -> Result<String, AuthError>;

    /// Verify and decode a token. Expired, malformed, and badly signed
    /// tokens all fail verification.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh per-password salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash. A mismatch is `Ok(false)`,
    /// never an error.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
