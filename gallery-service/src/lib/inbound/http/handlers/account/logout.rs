use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::expired_cookie;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::middleware::TOKEN_COOKIE;
use crate::inbound::http::router::AppState;

/// Sign out every device by rotating the remember token.
pub async fn logout(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    jar: CookieJar,
) -> (CookieJar, Response) {
    let user_id = user.id;
    if let Err(e) = state.user_service.save_new_remember_token(user).await {
        tracing::error!(error = %e, user_id = %user_id, "Failed to rotate remember token on logout");
    }

    let jar = jar.add(expired_cookie(TOKEN_COOKIE));
    (
        jar,
        (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response(),
    )
}
