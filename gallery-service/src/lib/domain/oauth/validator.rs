use async_trait::async_trait;

use crate::domain::errors::ModelError;
use crate::domain::errors::ValidationError;
use crate::domain::oauth::models::OAuthCredential;
use crate::domain::oauth::models::OAuthId;
use crate::domain::oauth::models::SUPPORTED_PROVIDERS;
use crate::domain::oauth::ports::OAuthRepository;
use crate::domain::user::models::UserId;

/// Validation layer in front of an OAuth credential store.
pub struct OAuthValidator<R>
where
    R: OAuthRepository,
{
    repository: R,
}

impl<R> OAuthValidator<R>
where
    R: OAuthRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

fn require_provider(provider: &str) -> Result<(), ModelError> {
    if provider.is_empty() {
        return Err(ValidationError::ProviderEmpty.into());
    }
    if !SUPPORTED_PROVIDERS.contains(&provider) {
        return Err(ValidationError::ProviderUnsupported.into());
    }
    Ok(())
}

fn require_user_id(user_id: &UserId) -> Result<(), ModelError> {
    if user_id.is_nil() {
        Err(ModelError::InvalidId)
    } else {
        Ok(())
    }
}

fn require_id(id: &OAuthId) -> Result<(), ModelError> {
    if id.is_nil() {
        Err(ModelError::InvalidId)
    } else {
        Ok(())
    }
}

#[async_trait]
impl<R> OAuthRepository for OAuthValidator<R>
where
    R: OAuthRepository,
{
    async fn find(&self, user_id: &UserId, provider: &str) -> Result<OAuthCredential, ModelError> {
        require_provider(provider)?;
        require_user_id(user_id)?;
        self.repository.find(user_id, provider).await
    }

    async fn create(&self, credential: OAuthCredential) -> Result<OAuthCredential, ModelError> {
        require_provider(&credential.provider)?;
        require_id(&credential.id)?;
        require_user_id(&credential.user_id)?;
        self.repository.create(credential).await
    }

    async fn delete(&self, id: &OAuthId) -> Result<(), ModelError> {
        require_id(id)?;
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::oauth::models::OAuthToken;
    use crate::outbound::repositories::memory::MemoryOAuthRepository;

    fn token() -> OAuthToken {
        OAuthToken {
            access_token: "access".to_string(),
            token_type: "bearer".to_string(),
            refresh_token: None,
            expiry: None,
        }
    }

    #[tokio::test]
    async fn test_empty_provider_rejected() {
        let validator = OAuthValidator::new(MemoryOAuthRepository::new());

        let result = validator
            .create(OAuthCredential::new(UserId::new(), String::new(), token()))
            .await;

        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::ProviderEmpty))
        ));
    }

    #[tokio::test]
    async fn test_unsupported_provider_rejected_before_ids() {
        let validator = OAuthValidator::new(MemoryOAuthRepository::new());

        let result = validator
            .create(OAuthCredential::new(
                UserId::nil(),
                "myspace".to_string(),
                token(),
            ))
            .await;

        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::ProviderUnsupported))
        ));
    }

    #[tokio::test]
    async fn test_nil_user_rejected() {
        let validator = OAuthValidator::new(MemoryOAuthRepository::new());

        let result = validator.find(&UserId::nil(), "dropbox").await;

        assert!(matches!(result, Err(ModelError::InvalidId)));
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let validator = OAuthValidator::new(MemoryOAuthRepository::new());
        let user_id = UserId::new();

        let created = validator
            .create(OAuthCredential::new(user_id, "dropbox".to_string(), token()))
            .await
            .unwrap();

        let found = validator.find(&user_id, "dropbox").await.unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_create_find_delete_round_trip() {
        let validator = OAuthValidator::new(MemoryOAuthRepository::new());
        let user_id = UserId::new();

        let created = validator
            .create(OAuthCredential::new(user_id, "dropbox".to_string(), token()))
            .await
            .unwrap();
        let found = validator.find(&user_id, "dropbox").await.unwrap();
        assert_eq!(found.id, created.id);

        validator.delete(&found.id).await.unwrap();

        assert!(matches!(
            validator.find(&user_id, "dropbox").await,
            Err(ModelError::NotFound)
        ));
        assert!(matches!(
            validator.find(&user_id, "unsupported-x").await,
            Err(ModelError::Validation(ValidationError::ProviderUnsupported))
        ));
    }

    #[tokio::test]
    async fn test_delete_nil_id_rejected() {
        let validator = OAuthValidator::new(MemoryOAuthRepository::new());

        let result = validator.delete(&OAuthId::nil()).await;

        assert!(matches!(result, Err(ModelError::InvalidId)));
    }
}
