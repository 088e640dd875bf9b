use async_trait::async_trait;

use crate::domain::errors::ModelError;
use crate::domain::oauth::models::OAuthCredential;
use crate::domain::oauth::models::OAuthId;
use crate::domain::oauth::models::OAuthToken;
use crate::domain::user::models::UserId;

/// Port for OAuth credential service operations.
#[async_trait]
pub trait OAuthServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `Validation(ProviderEmpty | ProviderUnsupported)` - Bad provider
    /// * `NotFound` - User has not connected this provider
    async fn find(&self, user_id: &UserId, provider: &str) -> Result<OAuthCredential, ModelError>;

    async fn create(&self, credential: OAuthCredential) -> Result<OAuthCredential, ModelError>;

    async fn delete(&self, id: &OAuthId) -> Result<(), ModelError>;

    /// Replace whatever credential the user holds for `provider`.
    ///
    /// Runs find, delete and create as separate store calls.
    async fn reauthorize(
        &self,
        user_id: &UserId,
        provider: &str,
        token: OAuthToken,
    ) -> Result<OAuthCredential, ModelError>;
}

/// Persistence operations for OAuth credentials.
#[async_trait]
pub trait OAuthRepository: Send + Sync + 'static {
    /// # Errors
    /// * `NotFound` - No live credential for this user and provider
    async fn find(&self, user_id: &UserId, provider: &str) -> Result<OAuthCredential, ModelError>;

    async fn create(&self, credential: OAuthCredential) -> Result<OAuthCredential, ModelError>;

    async fn delete(&self, id: &OAuthId) -> Result<(), ModelError>;
}
