use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::MessageData;
use crate::domain::errors::ModelError;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::alerts::persist_alert;
use crate::inbound::http::handlers::alerts::Alert;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

const RESET_SENT: &str =
    "Reset password instructions sent to your email address. Please check your inbox";

/// The response is the same whether or not the address belongs to a user.
pub async fn forgot_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ForgotPasswordRequest>,
) -> (CookieJar, ApiSuccess<MessageData>) {
    match state.user_service.initiate_password_reset(&body.email).await {
        Ok(ticket) => {
            if let Err(e) = state
                .mailer
                .send_password_reset(&ticket.user, &ticket.token)
                .await
            {
                tracing::error!(error = %e, user_id = %ticket.user.id, "Failed to send password reset email");
            }
        }
        Err(ModelError::NotFound) | Err(ModelError::Validation(_)) => {
            tracing::debug!("Password reset requested for unknown address");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initiate password reset");
        }
    }

    let jar = persist_alert(jar, Alert::success(RESET_SENT));
    (
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            MessageData {
                message: RESET_SENT.to_string(),
            },
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequest {
    email: String,
}
