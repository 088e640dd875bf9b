use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::cookie::CookieJar;

use super::find_owned;
use crate::domain::errors::ModelError;
use crate::domain::gallery::ports::GalleryServicePort;
use crate::domain::gallery::ports::ImageStore;
use crate::inbound::http::handlers::alerts::persist_alert;
use crate::inbound::http::handlers::alerts::Alert;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Remove every image of the gallery, then the gallery itself.
pub async fn delete_gallery(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(gallery_id): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<()>), ApiError> {
    let gallery = find_owned(&state, &gallery_id, &user).await?;

    let images = state
        .image_store
        .list(&gallery.id)
        .await
        .map_err(ApiError::from)?;
    for image in &images {
        match state.image_store.delete(image).await {
            Ok(()) | Err(ModelError::NotFound) => {}
            Err(e) => return Err(ApiError::from(e)),
        }
    }

    state
        .gallery_service
        .delete(&gallery)
        .await
        .map_err(ApiError::from)?;

    tracing::info!(gallery_id = %gallery.id, images = images.len(), "Gallery deleted");

    let jar = persist_alert(jar, Alert::success("Gallery deleted"));
    Ok((jar, ApiSuccess::new(StatusCode::NO_CONTENT, ())))
}
