use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::remember_token;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::alerts::persist_alert;
use crate::inbound::http::handlers::alerts::Alert;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::middleware::token_cookie;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignupRequest>,
) -> Result<(CookieJar, ApiSuccess<UserData>), ApiError> {
    let user = state
        .user_service
        .create_user(body.into_command())
        .await
        .map_err(ApiError::from)?;

    let mailer = state.mailer.clone();
    let name = user.full_name();
    let address = user.email.clone();
    tokio::spawn(async move {
        if let Err(e) = mailer.send_welcome(&name, &address).await {
            tracing::error!(error = %e, to = %address, "Failed to send welcome email");
        }
    });

    tracing::info!(user_id = %user.id, "User signed up");

    let jar = jar.add(token_cookie(
        remember_token(&user)?,
        state.remember_token_hours,
    ));
    let jar = persist_alert(jar, Alert::success("Welcome to the gallery"));

    Ok((jar, ApiSuccess::new(StatusCode::CREATED, (&user).into())))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

impl SignupRequest {
    fn into_command(self) -> CreateUserCommand {
        CreateUserCommand::new(self.first_name, self.last_name, self.email, self.password)
    }
}
