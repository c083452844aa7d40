use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and session tokens.
///
/// Holds the secret-derived signing keys; immutable once built, so a single
/// instance is shared across all requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `issuer` - Issuer tag for issued tokens
    pub fn new(jwt_secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, issuer),
        }
    }

    /// Password hasher used for storage and verification.
    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a session token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identifier the token asserts
    ///
    /// # Returns
    /// Signed token valid for [`Claims::TTL_HOURS`]
    ///
    /// # Errors
    /// * `JwtError::EncodingFailed` - Token generation failed
    pub fn issue_token(&self, subject: impl ToString) -> Result<String, JwtError> {
        let claims = Claims::new(subject, self.jwt_handler.issuer());
        self.jwt_handler.encode(&claims)
    }

    /// Validate and decode a session token.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, forged or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
