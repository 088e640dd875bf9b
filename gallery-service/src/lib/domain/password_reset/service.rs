use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;

use crate::domain::errors::ModelError;
use crate::domain::password_reset::models::PasswordReset;
use crate::domain::password_reset::models::PasswordResetId;
use crate::domain::password_reset::ports::PasswordResetRepository;
use crate::domain::password_reset::ports::PasswordResetServicePort;
use crate::domain::user::models::UserId;

/// Domain service for password-reset requests.
pub struct PasswordResetService<PR>
where
    PR: PasswordResetRepository,
{
    repository: Arc<PR>,
    ttl: Duration,
}

impl<PR> PasswordResetService<PR>
where
    PR: PasswordResetRepository,
{
    /// # Arguments
    /// * `repository` - Validated password-reset persistence
    /// * `ttl` - Age after which a request no longer resolves
    pub fn new(repository: Arc<PR>, ttl: Duration) -> Self {
        Self { repository, ttl }
    }
}

#[async_trait]
impl<PR> PasswordResetServicePort for PasswordResetService<PR>
where
    PR: PasswordResetRepository,
{
    async fn create(&self, user_id: &UserId) -> Result<PasswordReset, ModelError> {
        self.repository.create(PasswordReset::new(*user_id)).await
    }

    async fn get_by_token(&self, token: &str) -> Result<PasswordReset, ModelError> {
        let reset = self.repository.get_by_token(token).await?;

        if reset.is_expired(self.ttl, Utc::now()) {
            tracing::info!(reset_id = %reset.id, "Password reset token expired");
            if let Err(e) = self.repository.delete(&reset.id).await {
                tracing::warn!(reset_id = %reset.id, error = %e, "Failed to delete expired password reset");
            }
            return Err(ModelError::NotFound);
        }

        Ok(reset)
    }

    async fn delete(&self, id: &PasswordResetId) -> Result<(), ModelError> {
        self.repository.delete(id).await
    }
}
