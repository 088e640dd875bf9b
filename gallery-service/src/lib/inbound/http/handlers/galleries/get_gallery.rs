use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::with_images;
use crate::domain::gallery::ports::GalleryServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::GalleryData;
use crate::inbound::http::handlers::ImageData;
use crate::inbound::http::router::AppState;

const DEFAULT_COLUMNS: usize = 3;
const MAX_COLUMNS: usize = 12;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewGalleryParams {
    columns: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryViewData {
    pub gallery: GalleryData,
    pub columns: Vec<Vec<ImageData>>,
}

/// Public view of a gallery with its images.
pub async fn get_gallery(
    State(state): State<AppState>,
    Path(gallery_id): Path<String>,
    Query(params): Query<ViewGalleryParams>,
) -> Result<ApiSuccess<GalleryViewData>, ApiError> {
    let gallery = state
        .gallery_service
        .find_by_id(&gallery_id)
        .await
        .map_err(ApiError::from)?;
    let gallery = with_images(&state, gallery).await;

    let columns = params
        .columns
        .unwrap_or(DEFAULT_COLUMNS)
        .clamp(1, MAX_COLUMNS);

    Ok(ApiSuccess::new(
        StatusCode::OK,
        GalleryViewData {
            columns: gallery
                .image_columns(columns)
                .iter()
                .map(|column| column.iter().map(ImageData::from).collect())
                .collect(),
            gallery: (&gallery).into(),
        },
    ))
}
