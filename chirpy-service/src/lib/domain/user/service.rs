use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateCredentialsCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher used for new and changed passwords
    pub fn new(repository: Arc<UR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn update_credentials(
        &self,
        id: &UserId,
        command: UpdateCredentialsCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        user.email = command.email;
        user.password_hash = self.password_hasher.hash(&command.password)?;
        user.updated_at = Utc::now();

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User credentials updated");

        Ok(updated_user)
    }

    async fn upgrade_to_chirpy_red(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.set_chirpy_red(id).await?;
        tracing::info!(user_id = %id, "User upgraded to Chirpy Red");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn set_chirpy_red(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_params(1024, 1, 1).unwrap()
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s.to_string()).unwrap()
    }

    fn stored_user(id: UserId) -> User {
        let now = Utc::now();
        User {
            id,
            email: email("old@example.com"),
            password_hash: hasher().hash("old_password").unwrap(),
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2id")
                    && !user.is_chirpy_red
            })
            .times(1)
            .returning(Ok);

        let service = UserService::new(Arc::new(repository), hasher());

        let user = service
            .create_user(CreateUserCommand::new(
                email("test@example.com"),
                "password123".to_string(),
            ))
            .await
            .expect("Failed to create user");

        assert_eq!(user.email.as_str(), "test@example.com");
        assert_ne!(user.password_hash, "password123");
        assert!(hasher().verify("password123", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service
            .create_user(CreateUserCommand::new(
                email("test@example.com"),
                "password456".to_string(),
            ))
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_credentials_rehashes_password() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();
        let existing = stored_user(user_id);
        let old_hash = existing.password_hash.clone();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(move |user| {
                user.email.as_str() == "new@example.com" && user.password_hash != old_hash
            })
            .times(1)
            .returning(Ok);

        let service = UserService::new(Arc::new(repository), hasher());

        let updated = service
            .update_credentials(
                &user_id,
                UpdateCredentialsCommand {
                    email: email("new@example.com"),
                    password: "new_password".to_string(),
                },
            )
            .await
            .expect("Failed to update user");

        assert!(hasher().verify("new_password", &updated.password_hash).unwrap());
        assert!(!hasher().verify("old_password", &updated.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_credentials_unknown_user() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service
            .update_credentials(
                &UserId::new(),
                UpdateCredentialsCommand {
                    email: email("new@example.com"),
                    password: "new_password".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_upgrade_to_chirpy_red() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();

        repository
            .expect_set_chirpy_red()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), hasher());

        assert!(service.upgrade_to_chirpy_red(&user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_upgrade_unknown_user() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_set_chirpy_red()
            .returning(|id| Err(UserError::NotFound(id.to_string())));

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service.upgrade_to_chirpy_red(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
