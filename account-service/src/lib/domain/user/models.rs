use std::fmt;

use auth::PasswordError;
use auth::PasswordHasher;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::UserIdError;
use crate::user::errors::ValidationError;
use crate::user::errors::ValidationReason;

/// User aggregate entity.
///
/// `password` is the transient plaintext: it only lives for the duration of
/// a registration or login request and is never persisted or rendered.
#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub password: Option<String>,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    const PASSWORD_MIN_LENGTH: usize = 8;
    const PASSWORD_MAX_LENGTH: usize = 100;

    /// Build a not-yet-persisted user from registration input.
    ///
    /// The identifier is assigned here and never taken from the client.
    pub fn new(email: String, username: String, password: String) -> Self {
        Self {
            id: UserId::new(),
            email,
            username,
            password: Some(password),
            password_hash: None,
            created_at: Utc::now(),
        }
    }

    /// Check the user is fit for creation.
    ///
    /// Fields are checked in order (email, username, password) and the first
    /// failure is returned. The password is only required while no hash is
    /// stored; a non-empty password is always length-checked.
    ///
    /// # Errors
    /// * `ValidationError` - Naming the offending field and the reason
    pub fn validate(&self) -> Result<(), ValidationError> {
        Self::validate_email(&self.email)?;
        Self::validate_username(&self.username)?;
        self.validate_password()
    }

    fn validate_email(email: &str) -> Result<(), ValidationError> {
        if email.trim().is_empty() {
            return Err(ValidationError::new("email", ValidationReason::Required));
        }

        // Display-text forms ("Name <addr>") would store distinct strings for one mailbox.
        let options = email_address::Options::default().without_display_text();
        email_address::EmailAddress::parse_with_options(email, options)
            .map(|_| ())
            .map_err(|_| ValidationError::new("email", ValidationReason::InvalidEmail))
    }

    fn validate_username(username: &str) -> Result<(), ValidationError> {
        if username.trim().is_empty() {
            Err(ValidationError::new("username", ValidationReason::Required))
        } else {
            Ok(())
        }
    }

    fn validate_password(&self) -> Result<(), ValidationError> {
        match self.plaintext_password() {
            Some(password) => {
                let length = password.chars().count();
                if (Self::PASSWORD_MIN_LENGTH..=Self::PASSWORD_MAX_LENGTH).contains(&length) {
                    Ok(())
                } else {
                    Err(ValidationError::new(
                        "password",
                        ValidationReason::Length {
                            min: Self::PASSWORD_MIN_LENGTH,
                            max: Self::PASSWORD_MAX_LENGTH,
                        },
                    ))
                }
            }
            None if self.password_hash.is_none() => {
                Err(ValidationError::new("password", ValidationReason::Required))
            }
            None => Ok(()),
        }
    }

    /// Derive the stored hash from the plaintext password.
    ///
    /// Leaves the stored hash untouched when there is no plaintext password.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing failed
    pub fn prepare_for_storage(&mut self, hasher: &PasswordHasher) -> Result<(), PasswordError> {
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            self.password_hash = Some(hasher.hash(password)?);
        }
        Ok(())
    }

    /// Drop the plaintext password before the user leaves the service.
    pub fn sanitize(&mut self) {
        self.password = None;
    }

    /// Check a login candidate against the stored hash.
    ///
    /// A user without a stored hash never matches.
    pub fn matches_password(&self, hasher: &PasswordHasher, candidate: &str) -> bool {
        self.password_hash
            .as_deref()
            .map_or(false, |hash| hasher.verify(candidate, hash))
    }

    fn plaintext_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("password_hash", &self.password_hash.as_ref().map(|_| "[redacted]"))
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user from raw client input.
///
/// Fields are unvalidated; the service validates them as a user.
#[derive(Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RegisterUserCommand {
    pub fn new(email: String, username: String, password: String) -> Self {
        Self {
            email,
            username,
            password,
        }
    }
}

/// Command to open a session with email and password.
#[derive(Clone)]
pub struct CreateSessionCommand {
    pub email: String,
    pub password: String,
}

impl CreateSessionCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

/// Signed session token handed to the client after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
}
