use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtError;
use auth::PasswordError;

use crate::domain::user::models::CreateSessionCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::IdentityError;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Issuer tag written into every session token.
pub const TOKEN_ISSUER: &str = "account-service";

/// Domain service implementation for account and session operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    // Verified against on unknown emails so both login failures cost the same.
    dummy_hash: Option<String>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token codec built from the signing secret
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        let dummy_hash = authenticator
            .hash_password("timing-equalizer")
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to prepare login timing hash");
            })
            .ok();

        Self {
            repository,
            authenticator,
            dummy_hash,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let user = User::new(command.email, command.username, command.password);
        user.validate()?;

        let authenticator = Arc::clone(&self.authenticator);
        let user = run_blocking(move || {
            let mut user = user;
            user.prepare_for_storage(authenticator.password_hasher())?;
            Ok::<_, PasswordError>(user)
        })
        .await??;

        let mut created_user = self.repository.create(user).await?;
        created_user.sanitize();

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn create_session(&self, command: CreateSessionCommand) -> Result<Session, UserError> {
        let candidate = match self.repository.find_by_email(&command.email).await {
            Ok(user) => Some(user),
            Err(UserError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };

        let authenticator = Arc::clone(&self.authenticator);
        let dummy_hash = self.dummy_hash.clone();
        let password = command.password;
        let user = run_blocking(move || match candidate {
            Some(user) if user.matches_password(authenticator.password_hasher(), &password) => {
                Some(user)
            }
            Some(_) => None,
            None => {
                if let Some(hash) = dummy_hash {
                    authenticator.verify_password(&password, &hash);
                }
                None
            }
        })
        .await?
        .ok_or_else(|| {
            tracing::warn!("Rejected login with incorrect email or password");
            UserError::IncorrectEmailOrPassword
        })?;

        let token = self.authenticator.issue_token(user.id).map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "Failed to sign session token");
            e
        })?;

        tracing::info!(user_id = %user.id, "Session created");

        Ok(Session { token })
    }

    async fn resolve_identity(&self, authorization: Option<&str>) -> Result<User, IdentityError> {
        let header = authorization
            .filter(|h| !h.is_empty())
            .ok_or(IdentityError::NotAuthenticated)?;

        let token = bearer_token(header)?;

        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Session token rejected");
            e
        })?;

        let user_id = UserId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(error = %e, "Session token subject is not a user id");
            JwtError::Malformed
        })?;

        match self.repository.find_by_id(&user_id).await {
            Ok(mut user) => {
                user.sanitize();
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Session subject did not resolve");
                Err(IdentityError::NotAuthenticated)
            }
        }
    }
}

/// Split `Bearer <token>` into its token.
///
/// Exactly two space-separated parts are accepted, the first being the
/// scheme (case-insensitive) and the second a non-empty token.
fn bearer_token(header: &str) -> Result<&str, IdentityError> {
    let mut parts = header.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(IdentityError::UnprocessableHeader),
    }
}

/// Run password work off the async executor.
async fn run_blocking<T, F>(f: F) -> Result<T, PasswordError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
}
