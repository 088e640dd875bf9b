use async_trait::async_trait;

use crate::domain::errors::ModelError;
use crate::domain::errors::ValidationError;
use crate::domain::gallery::models::Gallery;
use crate::domain::gallery::models::GalleryId;
use crate::domain::gallery::ports::GalleryRepository;
use crate::domain::user::models::UserId;

/// Validation layer in front of a gallery store.
pub struct GalleryValidator<R>
where
    R: GalleryRepository,
{
    repository: R,
}

impl<R> GalleryValidator<R>
where
    R: GalleryRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn require_title(&self, gallery: &mut Gallery) -> Result<(), ModelError> {
        let title = gallery.title.trim();
        if title.is_empty() {
            return Err(ValidationError::TitleRequired.into());
        }
        gallery.title = title.to_string();
        Ok(())
    }

    fn require_owner(&self, owner: &UserId) -> Result<(), ModelError> {
        if owner.is_nil() {
            Err(ValidationError::OwnerRequired.into())
        } else {
            Ok(())
        }
    }

    fn require_id(&self, id: &GalleryId) -> Result<(), ModelError> {
        if id.is_nil() {
            Err(ModelError::InvalidId)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<R> GalleryRepository for GalleryValidator<R>
where
    R: GalleryRepository,
{
    async fn create(&self, mut gallery: Gallery) -> Result<Gallery, ModelError> {
        self.require_title(&mut gallery)?;
        self.require_owner(&gallery.user_id)?;
        self.repository.create(gallery).await
    }

    async fn find_by_id(&self, id: &GalleryId) -> Result<Gallery, ModelError> {
        self.require_id(id)?;
        self.repository.find_by_id(id).await
    }

    async fn find_by_user_id(&self, owner: &UserId) -> Result<Vec<Gallery>, ModelError> {
        self.require_owner(owner)?;
        self.repository.find_by_user_id(owner).await
    }

    async fn update(&self, mut gallery: Gallery) -> Result<Gallery, ModelError> {
        self.require_owner(&gallery.user_id)?;
        self.require_title(&mut gallery)?;
        self.repository.update(gallery).await
    }

    async fn delete(&self, id: &GalleryId) -> Result<(), ModelError> {
        self.require_id(id)?;
        self.repository.delete(id).await
    }
}
