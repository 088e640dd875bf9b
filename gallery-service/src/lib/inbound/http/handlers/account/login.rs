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

const INVALID_LOGIN: &str = "Invalid email or password";

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<UserData>), ApiError> {
    let user = state
        .user_service
        .authenticate_user(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            ModelError::NotFound | ModelError::PasswordIncorrect => {
                ApiError::Unauthorized(INVALID_LOGIN.to_string())
            }
            other => ApiError::from(other),
        })?;

    let user = state
        .user_service
        .save_new_remember_token(user)
        .await
        .map_err(ApiError::from)?;

    let jar = jar.add(token_cookie(
        remember_token(&user)?,
        state.remember_token_hours,
    ));
    let jar = persist_alert(jar, Alert::success("Welcome back"));

    Ok((jar, ApiSuccess::new(StatusCode::OK, (&user).into())))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
