use async_trait::async_trait;

use crate::domain::user::models::CreateSessionCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::IdentityError;
use crate::user::errors::UserError;

/// Port for account and session operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user from raw credentials.
    ///
    /// # Arguments
    /// * `command` - Email, username and plaintext password as submitted
    ///
    /// # Returns
    /// Created user, without its plaintext password
    ///
    /// # Errors
    /// * `Validation` - A field failed validation
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Open a session for an email/password pair.
    ///
    /// # Returns
    /// Session carrying a signed token for the user
    ///
    /// # Errors
    /// * `IncorrectEmailOrPassword` - Unknown email or wrong password, indistinguishably
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_session(&self, command: CreateSessionCommand) -> Result<Session, UserError>;

    /// Resolve the user behind an `Authorization` header value.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value, `None` when the header is absent
    ///
    /// # Returns
    /// The authenticated user, without its plaintext password
    ///
    /// # Errors
    /// * `NotAuthenticated` - No header, or the token's subject does not resolve to a user
    /// * `UnprocessableHeader` - Header is not `Bearer <token>`
    /// * `Token` - Token is malformed, forged or expired
    async fn resolve_identity(&self, authorization: Option<&str>) -> Result<User, IdentityError>;
}

/// Persistence operations for user aggregate.
///
/// `create` must be atomic with respect to its own uniqueness checks.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create, with its password hash set
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No user with this identifier
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Errors
    /// * `NotFound` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &str) -> Result<User, UserError>;
}
