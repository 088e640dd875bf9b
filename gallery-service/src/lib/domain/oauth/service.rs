use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::ModelError;
use crate::domain::oauth::models::OAuthCredential;
use crate::domain::oauth::models::OAuthId;
use crate::domain::oauth::models::OAuthToken;
use crate::domain::oauth::ports::OAuthRepository;
use crate::domain::oauth::ports::OAuthServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for OAuth credentials.
pub struct OAuthService<OR>
where
    OR: OAuthRepository,
{
    repository: Arc<OR>,
}

impl<OR> OAuthService<OR>
where
    OR: OAuthRepository,
{
    pub fn new(repository: Arc<OR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<OR> OAuthServicePort for OAuthService<OR>
where
    OR: OAuthRepository,
{
    async fn find(&self, user_id: &UserId, provider: &str) -> Result<OAuthCredential, ModelError> {
        self.repository.find(user_id, provider).await
    }

    async fn create(&self, credential: OAuthCredential) -> Result<OAuthCredential, ModelError> {
        self.repository.create(credential).await
    }

    async fn delete(&self, id: &OAuthId) -> Result<(), ModelError> {
        self.repository.delete(id).await
    }

    async fn reauthorize(
        &self,
        user_id: &UserId,
        provider: &str,
        token: OAuthToken,
    ) -> Result<OAuthCredential, ModelError> {
        match self.repository.find(user_id, provider).await {
            Ok(existing) => self.repository.delete(&existing.id).await?,
            Err(ModelError::NotFound) => {}
            Err(e) => return Err(e),
        }

        let credential = self
            .repository
            .create(OAuthCredential::new(*user_id, provider.to_string(), token))
            .await?;
        tracing::info!(user_id = %user_id, provider, "OAuth credential stored");

        Ok(credential)
    }
}
