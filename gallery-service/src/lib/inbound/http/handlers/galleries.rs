pub mod create_gallery;
pub mod delete_gallery;
pub mod get_gallery;
pub mod list_galleries;
pub mod update_gallery;

pub use create_gallery::create_gallery;
pub use delete_gallery::delete_gallery;
pub use get_gallery::get_gallery;
pub use list_galleries::list_galleries;
pub use update_gallery::update_gallery;

use serde::Deserialize;

use super::ApiError;
use crate::domain::errors::ModelError;
use crate::domain::gallery::models::Gallery;
use crate::domain::gallery::ports::GalleryServicePort;
use crate::domain::gallery::ports::ImageStore;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryRequest {
    title: String,
}

/// Load a gallery the user owns.
///
/// A gallery owned by someone else is reported exactly like a missing one.
pub(super) async fn find_owned(
    state: &AppState,
    gallery_id: &str,
    user: &User,
) -> Result<Gallery, ApiError> {
    let gallery = state
        .gallery_service
        .find_by_id(gallery_id)
        .await
        .map_err(ApiError::from)?;

    if !gallery.owned_by(&user.id) {
        tracing::debug!(gallery_id = %gallery.id, user_id = %user.id, "Gallery access denied");
        return Err(ApiError::from(ModelError::NotFound));
    }
    Ok(gallery)
}

/// Attach the stored images. A gallery whose images cannot be listed still
/// renders, without images.
async fn with_images(state: &AppState, mut gallery: Gallery) -> Gallery {
    gallery.images = match state.image_store.list(&gallery.id).await {
        Ok(images) => images,
        Err(e) => {
            tracing::warn!(gallery_id = %gallery.id, error = %e, "Failed to list gallery images");
            Vec::new()
        }
    };
    gallery
}
