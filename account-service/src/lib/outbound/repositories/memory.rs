use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// In-memory user store for development and tests.
///
/// Uniqueness checks and the insert happen under one write lock, so the
/// first of two concurrent duplicate registrations wins.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_by<P>(&self, predicate: P) -> Option<User>
    where
        P: Fn(&User) -> bool,
    {
        self.users
            .read()
            .await
            .values()
            .find(|user| predicate(user))
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email));
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username));
        }

        // Plaintext never reaches storage.
        user.sanitize();
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserError> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<User, UserError> {
        self.find_by(|user| user.email == email)
            .await
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    async fn find_by_username(&self, username: &str) -> Result<User, UserError> {
        self.find_by(|user| user.username == username)
            .await
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        let mut user = User::new(
            "test@test.com".to_string(),
            "test".to_string(),
            "password".to_string(),
        );
        user.password_hash = Some("$argon2id$test_hash".to_string());
        user
    }

    #[tokio::test]
    async fn test_create() {
        let repository = InMemoryUserRepository::new();

        let created = repository.create(test_user()).await.unwrap();

        assert_eq!(created.email, "test@test.com");
        assert!(created.password.is_none());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repository = InMemoryUserRepository::new();

        let missing = repository.find_by_id(&UserId::new()).await;
        assert!(matches!(missing, Err(UserError::NotFound(_))));

        let created = repository.create(test_user()).await.unwrap();
        let found = repository.find_by_id(&created.id).await.unwrap();
        assert_eq!(found.id, created.id);
        assert!(found.password.is_none());
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repository = InMemoryUserRepository::new();

        let missing = repository.find_by_email("test@test.com").await;
        assert!(matches!(missing, Err(UserError::NotFound(_))));

        let created = repository.create(test_user()).await.unwrap();
        let found = repository.find_by_email("test@test.com").await.unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let repository = InMemoryUserRepository::new();

        let missing = repository.find_by_username("test").await;
        assert!(matches!(missing, Err(UserError::NotFound(_))));

        let created = repository.create(test_user()).await.unwrap();
        let found = repository.find_by_username("test").await.unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let repository = InMemoryUserRepository::new();
        repository.create(test_user()).await.unwrap();

        let mut duplicate = test_user();
        duplicate.username = "other".to_string();

        let result = repository.create(duplicate).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_duplicate_username() {
        let repository = InMemoryUserRepository::new();
        repository.create(test_user()).await.unwrap();

        let mut duplicate = test_user();
        duplicate.email = "other@test.com".to_string();

        let result = repository.create(duplicate).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_registrations() {
        let repository = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = repository.clone();
                tokio::spawn(async move { repository.create(test_user()).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
    }
}
