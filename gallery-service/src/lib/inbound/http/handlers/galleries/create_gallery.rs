use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;

use super::GalleryRequest;
use crate::domain::gallery::ports::GalleryServicePort;
use crate::inbound::http::handlers::alerts::persist_alert;
use crate::inbound::http::handlers::alerts::Alert;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::GalleryData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn create_gallery(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
    Json(body): Json<GalleryRequest>,
) -> Result<(CookieJar, ApiSuccess<GalleryData>), ApiError> {
    let gallery = state
        .gallery_service
        .create_gallery(&body.title, &user.id)
        .await
        .map_err(ApiError::from)?;

    let jar = persist_alert(jar, Alert::success("Gallery created"));
    Ok((jar, ApiSuccess::new(StatusCode::CREATED, (&gallery).into())))
}
