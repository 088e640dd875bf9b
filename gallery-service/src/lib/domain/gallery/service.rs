use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::errors::ModelError;
use crate::domain::gallery::models::Gallery;
use crate::domain::gallery::models::GalleryId;
use crate::domain::gallery::ports::GalleryRepository;
use crate::domain::gallery::ports::GalleryServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for gallery operations.
pub struct GalleryService<GR>
where
    GR: GalleryRepository,
{
    repository: Arc<GR>,
}

impl<GR> GalleryService<GR>
where
    GR: GalleryRepository,
{
    pub fn new(repository: Arc<GR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<GR> GalleryServicePort for GalleryService<GR>
where
    GR: GalleryRepository,
{
    async fn create_gallery(&self, title: &str, owner: &UserId) -> Result<Gallery, ModelError> {
        let gallery = self
            .repository
            .create(Gallery::new(title.to_string(), *owner))
            .await?;
        tracing::info!(gallery_id = %gallery.id, user_id = %owner, "Gallery created");

        Ok(gallery)
    }

    async fn find_by_id(&self, id: &str) -> Result<Gallery, ModelError> {
        let id = GalleryId::from_string(id)?;
        self.repository.find_by_id(&id).await
    }

    async fn find_by_user_id(&self, owner: &UserId) -> Result<Vec<Gallery>, ModelError> {
        self.repository.find_by_user_id(owner).await
    }

    async fn update(&self, mut gallery: Gallery) -> Result<Gallery, ModelError> {
        gallery.updated_at = Utc::now();
        self.repository.update(gallery).await
    }

    async fn delete(&self, gallery: &Gallery) -> Result<(), ModelError> {
        self.repository.delete(&gallery.id).await?;
        tracing::info!(gallery_id = %gallery.id, "Gallery deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;

    mock! {
        pub TestGalleryRepository {}

        #[async_trait]
        impl GalleryRepository for TestGalleryRepository {
            async fn create(&self, gallery: Gallery) -> Result<Gallery, ModelError>;
            async fn find_by_id(&self, id: &GalleryId) -> Result<Gallery, ModelError>;
            async fn find_by_user_id(&self, owner: &UserId) -> Result<Vec<Gallery>, ModelError>;
            async fn update(&self, gallery: Gallery) -> Result<Gallery, ModelError>;
            async fn delete(&self, id: &GalleryId) -> Result<(), ModelError>;
        }
    }

    #[tokio::test]
    async fn test_create_gallery() {
        let mut repository = MockTestGalleryRepository::new();
        let owner = UserId::new();

        repository
            .expect_create()
            .withf(move |gallery| gallery.title == "Holidays" && gallery.user_id == owner)
            .times(1)
            .returning(|gallery| Ok(gallery));

        let service = GalleryService::new(Arc::new(repository));

        let gallery = service.create_gallery("Holidays", &owner).await.unwrap();
        assert_eq!(gallery.title, "Holidays");
        assert!(gallery.images.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id_malformed_does_not_query() {
        let mut repository = MockTestGalleryRepository::new();
        repository.expect_find_by_id().times(0);

        let service = GalleryService::new(Arc::new(repository));

        let result = service.find_by_id("definitely-not-a-uuid").await;
        assert!(matches!(result, Err(ModelError::InvalidId)));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let mut repository = MockTestGalleryRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(ModelError::NotFound));

        let service = GalleryService::new(Arc::new(repository));

        let result = service.find_by_id(&GalleryId::new().to_string()).await;
        assert!(matches!(result, Err(ModelError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_by_gallery_id() {
        let mut repository = MockTestGalleryRepository::new();
        let gallery = Gallery::new("Holidays".to_string(), UserId::new());
        let gallery_id = gallery.id;

        repository
            .expect_delete()
            .withf(move |id| *id == gallery_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = GalleryService::new(Arc::new(repository));

        assert!(service.delete(&gallery).await.is_ok());
    }
}
