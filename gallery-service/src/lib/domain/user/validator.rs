use std::sync::OnceLock;

use async_trait::async_trait;
use auth::token;
use auth::Authenticator;
use regex::Regex;

use crate::domain::errors::ModelError;
use crate::domain::errors::ValidationError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

const PASSWORD_MIN_LENGTH: usize = 8;

fn email_pattern() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,16}$")
            .expect("Failed to compile email regex")
    })
}

/// Validation and normalization layer in front of a user store.
///
/// Every operation runs its rules in a fixed order and stops at the first
/// failure, so nothing reaches the store unless the whole pipeline passed.
pub struct UserValidator<R>
where
    R: UserRepository,
{
    repository: R,
    authenticator: Authenticator,
}

impl<R> UserValidator<R>
where
    R: UserRepository,
{
    pub fn new(repository: R, authenticator: Authenticator) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn normalize_email(&self, user: &mut User) {
        user.email = normalize_email(&user.email);
    }

    fn require_email_format(&self, user: &User) -> Result<(), ModelError> {
        if email_pattern().is_match(&user.email) {
            Ok(())
        } else {
            Err(ValidationError::EmailFormat.into())
        }
    }

    async fn require_email_available(&self, user: &User) -> Result<(), ModelError> {
        match self.repository.find_by_email(&user.email).await {
            Ok(existing) if existing.id != user.id => Err(ValidationError::EmailTaken.into()),
            Ok(_) => Ok(()),
            Err(ModelError::NotFound) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn require_password(&self, user: &User) -> Result<(), ModelError> {
        match user.password.as_deref() {
            Some(password) if !password.is_empty() => Ok(()),
            _ => Err(ValidationError::PasswordRequired.into()),
        }
    }

    fn require_password_min_length(&self, user: &User) -> Result<(), ModelError> {
        match user.password.as_deref() {
            Some(password) if password.chars().count() < PASSWORD_MIN_LENGTH => {
                Err(ValidationError::PasswordTooShort.into())
            }
            _ => Ok(()),
        }
    }

    fn hash_password(&self, user: &mut User) -> Result<(), ModelError> {
        if let Some(password) = user.password.take() {
            user.password_hash = self.authenticator.hash_password(&password)?;
        }
        Ok(())
    }

    fn default_remember_token(&self, user: &mut User) -> Result<(), ModelError> {
        if user.remember_token.is_none() {
            user.remember_token = Some(token::generate()?);
        }
        Ok(())
    }

    fn require_remember_token_min_bytes(&self, user: &User) -> Result<(), ModelError> {
        let Some(raw) = user.remember_token.as_deref() else {
            return Ok(());
        };

        match token::byte_len(raw) {
            Ok(n) if n >= token::REMEMBER_TOKEN_BYTES => Ok(()),
            _ => Err(ValidationError::TokenTooShort.into()),
        }
    }

    fn hash_remember_token(&self, user: &mut User) {
        if let Some(raw) = user.remember_token.as_deref() {
            user.remember_token_hash = self.authenticator.hash_token(raw);
        }
    }

    fn require_remember_token_hash(&self, user: &User) -> Result<(), ModelError> {
        if user.remember_token_hash.is_empty() {
            Err(ValidationError::TokenHashMissing.into())
        } else {
            Ok(())
        }
    }

    fn require_id(&self, id: &UserId) -> Result<(), ModelError> {
        if id.is_nil() {
            Err(ModelError::InvalidId)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<R> UserRepository for UserValidator<R>
where
    R: UserRepository,
{
    async fn create(&self, mut user: User) -> Result<User, ModelError> {
        self.normalize_email(&mut user);
        self.require_email_format(&user)?;
        self.require_email_available(&user).await?;
        self.require_password(&user)?;
        self.require_password_min_length(&user)?;
        self.hash_password(&mut user)?;
        self.default_remember_token(&mut user)?;
        self.require_remember_token_min_bytes(&user)?;
        self.hash_remember_token(&mut user);
        self.require_remember_token_hash(&user)?;

        let remember_token = user.remember_token.take();
        let mut created = self.repository.create(user).await?;
        created.remember_token = remember_token;
        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, ModelError> {
        self.require_id(id)?;
        self.repository.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<User, ModelError> {
        let email = normalize_email(email);
        if !email_pattern().is_match(&email) {
            return Err(ValidationError::EmailFormat.into());
        }
        self.repository.find_by_email(&email).await
    }

    async fn find_by_remember_token(&self, token: &str) -> Result<User, ModelError> {
        let token_hash = self.authenticator.hash_token(token);
        self.repository.find_by_remember_token(&token_hash).await
    }

    async fn update(&self, mut user: User) -> Result<User, ModelError> {
        self.require_id(&user.id)?;
        self.normalize_email(&mut user);
        self.require_email_format(&user)?;
        self.require_email_available(&user).await?;
        if user.password.is_some() {
            self.require_password(&user)?;
            self.require_password_min_length(&user)?;
            self.hash_password(&mut user)?;
        }
        self.require_remember_token_min_bytes(&user)?;
        self.hash_remember_token(&mut user);
        self.require_remember_token_hash(&user)?;

        let remember_token = user.remember_token.take();
        let mut updated = self.repository.update(user).await?;
        updated.remember_token = remember_token;
        Ok(updated)
    }

    async fn delete(&self, id: &UserId) -> Result<(), ModelError> {
        self.require_id(id)?;
        self.repository.delete(id).await
    }
}

/// Trim surrounding whitespace and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::repositories::memory::MemoryUserRepository;

    fn validator() -> UserValidator<MemoryUserRepository> {
        UserValidator::new(
            MemoryUserRepository::new(),
            Authenticator::new(b"validator-test-secret").unwrap(),
        )
    }

    fn user(email: &str, password: &str) -> User {
        User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            email.to_string(),
            password.to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_normalizes_email() {
        let validator = validator();

        let created = validator
            .create(user("  Jane.Doe@Example.COM ", "longenough1"))
            .await
            .unwrap();

        assert_eq!(created.email, "jane.doe@example.com");
    }

    #[tokio::test]
    async fn test_create_clears_password_and_stores_hashes() {
        let validator = validator();

        let created = validator
            .create(user("jane@example.com", "longenough1"))
            .await
            .unwrap();

        assert!(created.password.is_none());
        assert!(created.password_hash.starts_with("$argon2"));
        assert!(!created.remember_token_hash.is_empty());

        let raw = created.remember_token.clone().unwrap();
        assert_ne!(raw, created.remember_token_hash);
        assert!(token::byte_len(&raw).unwrap() >= token::REMEMBER_TOKEN_BYTES);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_email_before_password_rules() {
        let validator = validator();

        let result = validator.create(user("not-an-email", "short")).await;

        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::EmailFormat))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_taken_email_case_insensitively() {
        let validator = validator();
        validator
            .create(user("jane@example.com", "longenough1"))
            .await
            .unwrap();

        let result = validator
            .create(user("JANE@example.com", "longenough2"))
            .await;

        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::EmailTaken))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_password() {
        let validator = validator();

        let result = validator.create(user("jane@example.com", "")).await;

        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::PasswordRequired))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_short_password_without_writing() {
        let validator = validator();

        let result = validator.create(user("jane@example.com", "1234567")).await;

        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::PasswordTooShort))
        ));
        assert!(matches!(
            validator.find_by_email("jane@example.com").await,
            Err(ModelError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_short_remember_token() {
        let validator = validator();
        let mut candidate = user("jane@example.com", "longenough1");
        candidate.remember_token = Some(token::generate_with_len(16).unwrap());

        let result = validator.create(candidate).await;

        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::TokenTooShort))
        ));
    }

    #[tokio::test]
    async fn test_find_by_remember_token_uses_raw_token() {
        let validator = validator();
        let created = validator
            .create(user("jane@example.com", "longenough1"))
            .await
            .unwrap();

        let raw = created.remember_token.clone().unwrap();
        let found = validator.find_by_remember_token(&raw).await.unwrap();
        assert_eq!(found.id, created.id);

        let by_hash = validator
            .find_by_remember_token(&created.remember_token_hash)
            .await;
        assert!(matches!(by_hash, Err(ModelError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let validator = validator();
        let mut created = validator
            .create(user("jane@example.com", "longenough1"))
            .await
            .unwrap();

        created.first_name = "Janet".to_string();
        created.remember_token = None;
        let updated = validator.update(created).await.unwrap();

        assert_eq!(updated.first_name, "Janet");
    }

    #[tokio::test]
    async fn test_update_rejects_email_of_other_user() {
        let validator = validator();
        validator
            .create(user("jane@example.com", "longenough1"))
            .await
            .unwrap();
        let mut other = validator
            .create(user("john@example.com", "longenough1"))
            .await
            .unwrap();

        other.email = "jane@example.com".to_string();
        let result = validator.update(other).await;

        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::EmailTaken))
        ));
    }

    #[tokio::test]
    async fn test_update_rehashes_new_password() {
        let validator = validator();
        let created = validator
            .create(user("jane@example.com", "longenough1"))
            .await
            .unwrap();
        let old_hash = created.password_hash.clone();

        let mut changed = created;
        changed.password = Some("another-password".to_string());
        let updated = validator.update(changed).await.unwrap();

        assert!(updated.password.is_none());
        assert_ne!(updated.password_hash, old_hash);
    }

    #[tokio::test]
    async fn test_nil_id_is_rejected_before_lookup() {
        let validator = validator();

        assert!(matches!(
            validator.find_by_id(&UserId::nil()).await,
            Err(ModelError::InvalidId)
        ));
        assert!(matches!(
            validator.delete(&UserId::nil()).await,
            Err(ModelError::InvalidId)
        ));
    }

    #[test]
    fn test_email_pattern() {
        assert!(email_pattern().is_match("jane.doe+tag@mail.example.co"));
        assert!(!email_pattern().is_match("jane@example"));
        assert!(!email_pattern().is_match("Jane@Example.com"));
        assert!(!email_pattern().is_match("jane@example.abcdefghijklmnopq"));
    }
}
