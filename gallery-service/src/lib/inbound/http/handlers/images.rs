use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::galleries::find_owned;
use super::ApiError;
use super::ApiSuccess;
use super::ImageData;
use crate::domain::errors::ModelError;
use crate::domain::gallery::models::Image;
use crate::domain::gallery::ports::ImageStore;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Multipart field carrying uploaded files; may repeat.
const IMAGES_FIELD: &str = "images";

pub async fn upload_images(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(gallery_id): Path<String>,
    mut multipart: Multipart,
) -> Result<ApiSuccess<Vec<ImageData>>, ApiError> {
    let gallery = find_owned(&state, &gallery_id, &user).await?;

    let mut stored = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(IMAGES_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let contents = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let image = state
            .image_store
            .create(&gallery.id, &file_name, &contents)
            .await
            .map_err(ApiError::from)?;
        stored.push(ImageData::from(&image));
    }

    if stored.is_empty() {
        return Err(ApiError::BadRequest("No images were uploaded".to_string()));
    }

    tracing::info!(gallery_id = %gallery.id, count = stored.len(), "Images uploaded");
    Ok(ApiSuccess::new(StatusCode::CREATED, stored))
}

pub async fn delete_image(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((gallery_id, file_name)): Path<(String, String)>,
) -> Result<ApiSuccess<()>, ApiError> {
    let gallery = find_owned(&state, &gallery_id, &user).await?;

    state
        .image_store
        .delete(&Image::new(gallery.id, file_name))
        .await
        .map_err(|e| match e {
            // An unusable name can not match a stored image.
            ModelError::Validation(_) => ApiError::from(ModelError::NotFound),
            other => ApiError::from(other),
        })
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
