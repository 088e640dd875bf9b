//! In-process stores backed by `HashMap`s.
//!
//! They follow the same contract as the PostgreSQL stores (soft delete,
//! live-email uniqueness, one live reset per user, one live credential per
//! user and provider) and back the validator tests and the HTTP test app.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::errors::ModelError;
use crate::domain::errors::ValidationError;
use crate::domain::gallery::models::Gallery;
use crate::domain::gallery::models::GalleryId;
use crate::domain::gallery::ports::GalleryRepository;
use crate::domain::oauth::models::OAuthCredential;
use crate::domain::oauth::models::OAuthId;
use crate::domain::oauth::ports::OAuthRepository;
use crate::domain::password_reset::models::PasswordReset;
use crate::domain::password_reset::models::PasswordResetId;
use crate::domain::password_reset::ports::PasswordResetRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

#[derive(Default, Clone)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn stored_user(user: &User) -> User {
    let mut stored = user.clone();
    stored.password = None;
    stored.remember_token = None;
    stored
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, ModelError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.deleted_at.is_none() && u.email == user.email)
        {
            return Err(ValidationError::EmailTaken.into());
        }
        users.insert(user.id, stored_user(&user));
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, ModelError> {
        let users = self.users.read().await;
        users
            .get(id)
            .filter(|u| u.deleted_at.is_none())
            .cloned()
            .ok_or(ModelError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, ModelError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.deleted_at.is_none() && u.email == email)
            .cloned()
            .ok_or(ModelError::NotFound)
    }

    async fn find_by_remember_token(&self, token_hash: &str) -> Result<User, ModelError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.deleted_at.is_none() && u.remember_token_hash == token_hash)
            .cloned()
            .ok_or(ModelError::NotFound)
    }

    async fn update(&self, user: User) -> Result<User, ModelError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.deleted_at.is_none() && u.id != user.id && u.email == user.email)
        {
            return Err(ValidationError::EmailTaken.into());
        }

        let existing = users
            .get_mut(&user.id)
            .filter(|u| u.deleted_at.is_none())
            .ok_or(ModelError::NotFound)?;
        *existing = stored_user(&user);
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), ModelError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .filter(|u| u.deleted_at.is_none())
            .ok_or(ModelError::NotFound)?;
        user.deleted_at = Some(Utc::now());
        Ok(())
    }
}

/// A stored record with its soft delete marker.
#[derive(Clone)]
struct Row<T> {
    value: T,
    deleted_at: Option<DateTime<Utc>>,
}

impl<T> Row<T> {
    fn live(value: T) -> Self {
        Self {
            value,
            deleted_at: None,
        }
    }

    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

fn soft_delete<K, T>(rows: &mut HashMap<K, Row<T>>, id: &K)
where
    K: std::hash::Hash + Eq,
{
    if let Some(row) = rows.get_mut(id).filter(|row| row.is_live()) {
        row.deleted_at = Some(Utc::now());
    }
}

#[derive(Default, Clone)]
pub struct MemoryGalleryRepository {
    galleries: Arc<RwLock<HashMap<GalleryId, Row<Gallery>>>>,
}

impl MemoryGalleryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GalleryRepository for MemoryGalleryRepository {
    async fn create(&self, gallery: Gallery) -> Result<Gallery, ModelError> {
        let mut galleries = self.galleries.write().await;
        let mut stored = gallery.clone();
        stored.images.clear();
        galleries.insert(gallery.id, Row::live(stored));
        Ok(gallery)
    }

    async fn find_by_id(&self, id: &GalleryId) -> Result<Gallery, ModelError> {
        let galleries = self.galleries.read().await;
        galleries
            .get(id)
            .filter(|row| row.is_live())
            .map(|row| row.value.clone())
            .ok_or(ModelError::NotFound)
    }

    async fn find_by_user_id(&self, owner: &UserId) -> Result<Vec<Gallery>, ModelError> {
        let galleries = self.galleries.read().await;
        let mut owned: Vec<Gallery> = galleries
            .values()
            .filter(|row| row.is_live() && row.value.user_id == *owner)
            .map(|row| row.value.clone())
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update(&self, gallery: Gallery) -> Result<Gallery, ModelError> {
        let mut galleries = self.galleries.write().await;
        let existing = galleries
            .get_mut(&gallery.id)
            .filter(|row| row.is_live())
            .ok_or(ModelError::NotFound)?;
        existing.value.title = gallery.title.clone();
        existing.value.user_id = gallery.user_id;
        existing.value.updated_at = gallery.updated_at;
        Ok(gallery)
    }

    async fn delete(&self, id: &GalleryId) -> Result<(), ModelError> {
        soft_delete(&mut *self.galleries.write().await, id);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MemoryPasswordResetRepository {
    resets: Arc<RwLock<HashMap<PasswordResetId, Row<PasswordReset>>>>,
}

impl MemoryPasswordResetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PasswordResetRepository for MemoryPasswordResetRepository {
    async fn get_by_token(&self, token_hash: &str) -> Result<PasswordReset, ModelError> {
        let resets = self.resets.read().await;
        resets
            .values()
            .find(|row| row.is_live() && row.value.token_hash == token_hash)
            .map(|row| row.value.clone())
            .ok_or(ModelError::NotFound)
    }

    async fn create(&self, reset: PasswordReset) -> Result<PasswordReset, ModelError> {
        let mut resets = self.resets.write().await;
        // Upsert on the live request of the user.
        resets.retain(|_, row| !(row.is_live() && row.value.user_id == reset.user_id));

        let mut stored = reset.clone();
        stored.token = None;
        resets.insert(reset.id, Row::live(stored));
        Ok(reset)
    }

    async fn delete(&self, id: &PasswordResetId) -> Result<(), ModelError> {
        soft_delete(&mut *self.resets.write().await, id);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MemoryOAuthRepository {
    credentials: Arc<RwLock<HashMap<OAuthId, Row<OAuthCredential>>>>,
}

impl MemoryOAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OAuthRepository for MemoryOAuthRepository {
    async fn find(&self, user_id: &UserId, provider: &str) -> Result<OAuthCredential, ModelError> {
        let credentials = self.credentials.read().await;
        credentials
            .values()
            .find(|row| {
                row.is_live() && row.value.user_id == *user_id && row.value.provider == provider
            })
            .map(|row| row.value.clone())
            .ok_or(ModelError::NotFound)
    }

    async fn create(&self, credential: OAuthCredential) -> Result<OAuthCredential, ModelError> {
        let mut credentials = self.credentials.write().await;
        if credentials.values().any(|row| {
            row.is_live()
                && row.value.user_id == credential.user_id
                && row.value.provider == credential.provider
        }) {
            return Err(ModelError::Unexpected(
                "Credential already exists for user and provider".to_string(),
            ));
        }
        credentials.insert(credential.id, Row::live(credential.clone()));
        Ok(credential)
    }

    async fn delete(&self, id: &OAuthId) -> Result<(), ModelError> {
        soft_delete(&mut *self.credentials.write().await, id);
        Ok(())
    }
}
