use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::with_images;
use crate::domain::gallery::ports::GalleryServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::GalleryData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn list_galleries(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<Vec<GalleryData>>, ApiError> {
    let galleries = state
        .gallery_service
        .find_by_user_id(&user.id)
        .await
        .map_err(ApiError::from)?;

    let mut data = Vec::with_capacity(galleries.len());
    for gallery in galleries {
        data.push(GalleryData::from(&with_images(&state, gallery).await));
    }

    Ok(ApiSuccess::new(StatusCode::OK, data))
}
