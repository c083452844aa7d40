use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Why a user field was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationReason {
    #[error("cannot be blank")]
    Required,

    #[error("must be a valid email address")]
    InvalidEmail,

    #[error("the length must be between {min} and {max}")]
    Length { min: usize, max: usize },
}

/// Field-level validation failure of a user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("username: already exists")]
    UsernameAlreadyExists(String),

    #[error("email: already exists")]
    EmailAlreadyExists(String),

    #[error("incorrect email or password")]
    IncorrectEmailOrPassword,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Rejection of a request on a private route.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("unprocessable authorization header")]
    UnprocessableHeader,

    #[error("{0}")]
    Token(#[from] JwtError),
}
