use std::sync::Arc;

use async_trait::async_trait;
use auth::token;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::errors::ModelError;
use crate::domain::password_reset::ports::PasswordResetServicePort;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PasswordResetTicket;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// `UR` is expected to be the validator-wrapped store; this type adds the
/// flows that span several calls (login, token rotation, password reset).
pub struct UserService<UR, PS>
where
    UR: UserRepository,
    PS: PasswordResetServicePort,
{
    repository: Arc<UR>,
    password_resets: Arc<PS>,
    authenticator: Authenticator,
}

impl<UR, PS> UserService<UR, PS>
where
    UR: UserRepository,
    PS: PasswordResetServicePort,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Validated user persistence
    /// * `password_resets` - Password-reset request service
    /// * `authenticator` - Password verification
    pub fn new(repository: Arc<UR>, password_resets: Arc<PS>, authenticator: Authenticator) -> Self {
        Self {
            repository,
            password_resets,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, PS> UserServicePort for UserService<UR, PS>
where
    UR: UserRepository,
    PS: PasswordResetServicePort,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, ModelError> {
        let user = User::new(
            command.first_name,
            command.last_name,
            command.email,
            command.password,
        );

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, "User created");

        Ok(created)
    }

    async fn authenticate_user(&self, email: &str, password: &str) -> Result<User, ModelError> {
        let user = self.repository.find_by_email(email).await?;

        self.authenticator
            .verify_password(password, &user.password_hash)?;

        Ok(user)
    }

    async fn save_new_remember_token(&self, mut user: User) -> Result<User, ModelError> {
        user.password = None;
        user.remember_token = Some(token::generate()?);
        user.updated_at = Utc::now();

        self.repository.update(user).await
    }

    async fn find_by_remember_token(&self, token: &str) -> Result<User, ModelError> {
        self.repository.find_by_remember_token(token).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, ModelError> {
        self.repository.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<User, ModelError> {
        self.repository.find_by_email(email).await
    }

    async fn find_and_update_by_id(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, ModelError> {
        let mut user = self.repository.find_by_id(id).await?;

        if let Some(first_name) = command.first_name {
            user.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            user.last_name = last_name;
        }

        if let Some(email) = command.email {
            user.email = email;
        }

        user.password = command.password;
        user.remember_token = None;
        user.updated_at = Utc::now();

        self.repository.update(user).await
    }

    async fn find_and_delete_by_id(&self, id: &UserId) -> Result<User, ModelError> {
        let user = self.repository.find_by_id(id).await?;
        self.repository.delete(&user.id).await?;
        tracing::info!(user_id = %user.id, "User deleted");

        Ok(user)
    }

    async fn initiate_password_reset(&self, email: &str) -> Result<PasswordResetTicket, ModelError> {
        let user = self.repository.find_by_email(email).await?;
        let reset = self.password_resets.create(&user.id).await?;

        let token = reset.token.ok_or_else(|| {
            ModelError::Unexpected("Password reset created without a token".to_string())
        })?;
        tracing::info!(user_id = %user.id, "Password reset initiated");

        Ok(PasswordResetTicket { user, token })
    }

    async fn complete_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<User, ModelError> {
        let reset = self.password_resets.get_by_token(token).await?;

        let mut user = self.repository.find_by_id(&reset.user_id).await?;
        user.password = Some(new_password.to_string());
        user.remember_token = None;
        user.updated_at = Utc::now();
        let user = self.repository.update(user).await?;

        self.password_resets.delete(&reset.id).await?;
        tracing::info!(user_id = %user.id, "Password reset completed");

        self.save_new_remember_token(user).await
    }
}
