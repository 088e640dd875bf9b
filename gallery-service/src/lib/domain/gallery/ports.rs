use async_trait::async_trait;

use crate::domain::errors::ModelError;
use crate::domain::gallery::models::Gallery;
use crate::domain::gallery::models::GalleryId;
use crate::domain::gallery::models::Image;
use crate::domain::user::models::UserId;

/// Port for gallery domain service operations.
///
/// No ownership checks happen here; callers compare `Gallery::user_id`
/// with the requesting identity.
#[async_trait]
pub trait GalleryServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `Validation(TitleRequired)` - Title is blank
    /// * `Validation(OwnerRequired)` - Owner id is nil
    async fn create_gallery(&self, title: &str, owner: &UserId) -> Result<Gallery, ModelError>;

    /// Retrieve a gallery from its textual identifier.
    ///
    /// # Errors
    /// * `InvalidId` - Malformed or nil identifier; the store is not queried
    /// * `NotFound` - Gallery does not exist
    async fn find_by_id(&self, id: &str) -> Result<Gallery, ModelError>;

    /// Live galleries of an owner, newest first.
    async fn find_by_user_id(&self, owner: &UserId) -> Result<Vec<Gallery>, ModelError>;

    /// # Errors
    /// * `Validation(OwnerRequired)` - Owner id is nil
    /// * `Validation(TitleRequired)` - Title is blank
    async fn update(&self, gallery: Gallery) -> Result<Gallery, ModelError>;

    async fn delete(&self, gallery: &Gallery) -> Result<(), ModelError>;
}

/// Persistence operations for galleries.
#[async_trait]
pub trait GalleryRepository: Send + Sync + 'static {
    async fn create(&self, gallery: Gallery) -> Result<Gallery, ModelError>;

    /// # Errors
    /// * `NotFound` - No live gallery with this id
    async fn find_by_id(&self, id: &GalleryId) -> Result<Gallery, ModelError>;

    async fn find_by_user_id(&self, owner: &UserId) -> Result<Vec<Gallery>, ModelError>;

    async fn update(&self, gallery: Gallery) -> Result<Gallery, ModelError>;

    async fn delete(&self, id: &GalleryId) -> Result<(), ModelError>;
}

/// Storage for gallery image files.
#[async_trait]
pub trait ImageStore: Send + Sync + 'static {
    /// Write an image under the gallery directory, overwriting a file with
    /// the same name.
    ///
    /// # Errors
    /// * `Validation(ImageNameInvalid)` - Name has no usable file component
    async fn create(
        &self,
        gallery_id: &GalleryId,
        file_name: &str,
        contents: &[u8],
    ) -> Result<Image, ModelError>;

    /// Images of a gallery sorted by file name; empty if none were uploaded.
    async fn list(&self, gallery_id: &GalleryId) -> Result<Vec<Image>, ModelError>;

    /// # Errors
    /// * `NotFound` - File does not exist
    async fn delete(&self, image: &Image) -> Result<(), ModelError>;
}
