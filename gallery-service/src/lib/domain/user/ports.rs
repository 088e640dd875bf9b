use async_trait::async_trait;

use crate::domain::errors::ModelError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PasswordResetTicket;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Sign up a new user.
    ///
    /// # Returns
    /// Created user carrying its raw remember token
    ///
    /// # Errors
    /// * `Validation` - First failing rule of the create pipeline
    /// * `Unexpected` - Hashing, randomness or storage failure
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, ModelError>;

    /// Check an email and password pair.
    ///
    /// # Errors
    /// * `Validation(EmailFormat)` - Email is malformed
    /// * `NotFound` - No live user with this email
    /// * `PasswordIncorrect` - Password does not match
    async fn authenticate_user(&self, email: &str, password: &str) -> Result<User, ModelError>;

    /// Rotate the remember token of a user.
    ///
    /// Previously issued cookies stop resolving once this returns.
    ///
    /// # Returns
    /// User carrying the new raw remember token
    async fn save_new_remember_token(&self, user: User) -> Result<User, ModelError>;

    /// Resolve a raw remember token to its user.
    ///
    /// # Errors
    /// * `NotFound` - Token matches no live user
    async fn find_by_remember_token(&self, token: &str) -> Result<User, ModelError>;

    /// # Errors
    /// * `InvalidId` - Nil identifier
    /// * `NotFound` - User does not exist
    async fn find_by_id(&self, id: &UserId) -> Result<User, ModelError>;

    /// # Errors
    /// * `NotFound` - User does not exist
    async fn find_by_email(&self, email: &str) -> Result<User, ModelError>;

    /// Apply an update to an existing user.
    ///
    /// A new email or password goes through the same validation as sign up.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Validation` - Updated fields are invalid
    async fn find_and_update_by_id(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, ModelError>;

    /// Soft delete a user.
    ///
    /// # Returns
    /// The user as it was before deletion
    async fn find_and_delete_by_id(&self, id: &UserId) -> Result<User, ModelError>;

    /// Issue a password-reset token for the user owning `email`.
    ///
    /// Any previous live reset request of that user is replaced.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    async fn initiate_password_reset(&self, email: &str) -> Result<PasswordResetTicket, ModelError>;

    /// Consume a password-reset token and set a new password.
    ///
    /// # Returns
    /// User carrying a freshly issued remember token
    ///
    /// # Errors
    /// * `NotFound` - Token unknown, already used or expired
    /// * `Validation` - New password is invalid; the token stays usable
    async fn complete_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<User, ModelError>;
}

/// Persistence operations for the user aggregate.
///
/// Implemented both by stores and by the validator that decorates them.
/// At the store level `find_by_remember_token` receives the token hash;
/// at the validator level it receives the raw token.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `Validation(EmailTaken)` - A live user already owns the email
    /// * `Unexpected` - Storage failure
    async fn create(&self, user: User) -> Result<User, ModelError>;

    /// Retrieve a live user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No live user with this id
    async fn find_by_id(&self, id: &UserId) -> Result<User, ModelError>;

    /// Retrieve a live user by email address.
    ///
    /// # Errors
    /// * `NotFound` - No live user with this email
    async fn find_by_email(&self, email: &str) -> Result<User, ModelError>;

    /// Retrieve a live user by remember token.
    ///
    /// # Errors
    /// * `NotFound` - No live user with this token
    async fn find_by_remember_token(&self, token: &str) -> Result<User, ModelError>;

    /// Overwrite the stored fields of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Validation(EmailTaken)` - New email belongs to another live user
    async fn update(&self, user: User) -> Result<User, ModelError>;

    /// Soft delete a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn delete(&self, id: &UserId) -> Result<(), ModelError>;
}
