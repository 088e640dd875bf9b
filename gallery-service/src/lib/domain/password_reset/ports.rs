use async_trait::async_trait;

use crate::domain::errors::ModelError;
use crate::domain::password_reset::models::PasswordReset;
use crate::domain::password_reset::models::PasswordResetId;
use crate::domain::user::models::UserId;

/// Port for password-reset service operations.
#[async_trait]
pub trait PasswordResetServicePort: Send + Sync + 'static {
    /// Open a reset request for a user.
    ///
    /// # Returns
    /// Record carrying the raw token; it can not be retrieved again later
    ///
    /// # Errors
    /// * `Validation(OwnerRequired)` - Nil user id
    async fn create(&self, user_id: &UserId) -> Result<PasswordReset, ModelError>;

    /// Resolve a raw reset token.
    ///
    /// # Errors
    /// * `NotFound` - Token unknown or expired
    async fn get_by_token(&self, token: &str) -> Result<PasswordReset, ModelError>;

    /// # Errors
    /// * `InvalidId` - Nil identifier
    async fn delete(&self, id: &PasswordResetId) -> Result<(), ModelError>;
}

/// Persistence operations for password-reset requests.
///
/// The store receives the token hash in `get_by_token`; the validator in
/// front of it receives the raw token.
#[async_trait]
pub trait PasswordResetRepository: Send + Sync + 'static {
    /// # Errors
    /// * `NotFound` - No live request with this token
    async fn get_by_token(&self, token: &str) -> Result<PasswordReset, ModelError>;

    /// Persist a request, replacing any live request of the same user.
    async fn create(&self, reset: PasswordReset) -> Result<PasswordReset, ModelError>;

    async fn delete(&self, id: &PasswordResetId) -> Result<(), ModelError>;
}
