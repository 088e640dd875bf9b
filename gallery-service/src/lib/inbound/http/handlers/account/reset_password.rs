use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::remember_token;
use crate::domain::errors::ModelError;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::alerts::persist_alert;
use crate::inbound::http::handlers::alerts::Alert;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::middleware::token_cookie;
use crate::inbound::http::router::AppState;

const RESET_INVALID: &str = "Reset token is invalid or has expired";

pub async fn reset_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<(CookieJar, ApiSuccess<UserData>), ApiError> {
    let user = state
        .user_service
        .complete_password_reset(&body.token, &body.password)
        .await
        .map_err(|e| match e {
            ModelError::NotFound | ModelError::InvalidId => {
                ApiError::BadRequest(RESET_INVALID.to_string())
            }
            other => ApiError::from(other),
        })?;

    tracing::info!(user_id = %user.id, "Password reset completed");

    let jar = jar.add(token_cookie(
        remember_token(&user)?,
        state.remember_token_hours,
    ));
    let jar = persist_alert(jar, Alert::success("Your password has been reset"));

    Ok((jar, ApiSuccess::new(StatusCode::OK, (&user).into())))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequest {
    token: String,
    password: String,
}
