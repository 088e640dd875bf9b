use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::expired_cookie;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::middleware::TOKEN_COOKIE;
use crate::inbound::http::router::AppState;

pub async fn delete_me(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<()>), ApiError> {
    state
        .user_service
        .find_and_delete_by_id(&user.id)
        .await
        .map_err(ApiError::from)?;

    let jar = jar.add(expired_cookie(TOKEN_COOKIE));
    Ok((jar, ApiSuccess::new(StatusCode::NO_CONTENT, ())))
}
