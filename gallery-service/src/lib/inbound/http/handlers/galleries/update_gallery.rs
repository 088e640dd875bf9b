use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::Utc;

use super::find_owned;
use super::with_images;
use super::GalleryRequest;
use crate::domain::gallery::ports::GalleryServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::GalleryData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn update_gallery(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(gallery_id): Path<String>,
    Json(body): Json<GalleryRequest>,
) -> Result<ApiSuccess<GalleryData>, ApiError> {
    let mut gallery = find_owned(&state, &gallery_id, &user).await?;
    gallery.title = body.title;
    gallery.updated_at = Utc::now();

    let gallery = state
        .gallery_service
        .update(gallery)
        .await
        .map_err(ApiError::from)?;
    let gallery = with_images(&state, gallery).await;

    Ok(ApiSuccess::new(StatusCode::OK, (&gallery).into()))
}
