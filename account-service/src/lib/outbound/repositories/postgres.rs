use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;
use crate::user::errors::ValidationError;
use crate::user::errors::ValidationReason;

/// PostgreSQL-backed user store.
///
/// Uniqueness of email and username is enforced by table constraints, so a
/// concurrent duplicate `create` loses at the database.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRecord {
    id: Uuid,
    email: String,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        User {
            id: UserId(r.id),
            email: r.email,
            username: r.username,
            password: None,
            password_hash: Some(r.password_hash),
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let password_hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| ValidationError::new("password", ValidationReason::Required))?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id.0)
        .bind(&user.email)
        .bind(&user.username)
        .bind(password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return UserError::UsernameAlreadyExists(user.username.clone());
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return UserError::EmailAlreadyExists(user.email.clone());
                    }
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::from)
        .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<User, UserError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, username, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::from)
        .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    async fn find_by_username(&self, username: &str) -> Result<User, UserError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::from)
        .ok_or_else(|| UserError::NotFound(username.to_string()))
    }
}
