use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::errors::ModelError;
use crate::domain::errors::ValidationError;
use crate::domain::password_reset::models::PasswordReset;
use crate::domain::password_reset::models::PasswordResetId;
use crate::domain::password_reset::ports::PasswordResetRepository;

/// Validation layer in front of a password-reset store.
///
/// Generates the raw token on create and hashes every token before it
/// reaches the store.
pub struct PasswordResetValidator<R>
where
    R: PasswordResetRepository,
{
    repository: R,
    authenticator: Authenticator,
}

impl<R> PasswordResetValidator<R>
where
    R: PasswordResetRepository,
{
    pub fn new(repository: R, authenticator: Authenticator) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn require_user_id(&self, reset: &PasswordReset) -> Result<(), ModelError> {
        if reset.user_id.is_nil() {
            Err(ValidationError::OwnerRequired.into())
        } else {
            Ok(())
        }
    }

    fn set_token(&self, reset: &mut PasswordReset) -> Result<(), ModelError> {
        let issued = self.authenticator.issue_token()?;
        reset.token = Some(issued.raw);
        reset.token_hash = issued.hash;
        Ok(())
    }
}

#[async_trait]
impl<R> PasswordResetRepository for PasswordResetValidator<R>
where
    R: PasswordResetRepository,
{
    async fn get_by_token(&self, token: &str) -> Result<PasswordReset, ModelError> {
        let token_hash = self.authenticator.hash_token(token);
        self.repository.get_by_token(&token_hash).await
    }

    async fn create(&self, mut reset: PasswordReset) -> Result<PasswordReset, ModelError> {
        self.require_user_id(&reset)?;
        self.set_token(&mut reset)?;

        let token = reset.token.take();
        let mut created = self.repository.create(reset).await?;
        created.token = token;
        Ok(created)
    }

    async fn delete(&self, id: &PasswordResetId) -> Result<(), ModelError> {
        if id.is_nil() {
            return Err(ModelError::InvalidId);
        }
        self.repository.delete(id).await
    }
}
