use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::alerts::persist_alert;
use super::alerts::Alert;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::errors::ModelError;
use crate::domain::oauth::models::DROPBOX_PROVIDER;
use crate::domain::oauth::ports::OAuthServicePort;
use crate::inbound::http::middleware::expired_cookie;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::outbound::dropbox::DropboxError;
use crate::outbound::dropbox::DropboxFile;
use crate::outbound::dropbox::DropboxFolder;
use crate::outbound::dropbox::DropboxOAuth;

const STATE_COOKIE: &str = "oauth_state";
const STATE_MINUTES: i64 = 10;

fn provider_client<'a>(state: &'a AppState, provider: &str) -> Result<&'a DropboxOAuth, ApiError> {
    match provider {
        DROPBOX_PROVIDER => Ok(&state.dropbox_oauth),
        _ => Err(ApiError::from(ModelError::NotFound)),
    }
}

impl From<DropboxError> for ApiError {
    fn from(err: DropboxError) -> Self {
        ApiError::from(ModelError::Unexpected(err.to_string()))
    }
}

/// Send the user to the provider's consent page.
pub async fn connect(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Response), ApiError> {
    let client = provider_client(&state, &provider)?;
    let csrf_state = auth::token::generate().map_err(ModelError::from)?;

    let url = client.authorize_url(&csrf_state);
    let jar = jar.add(
        Cookie::build((STATE_COOKIE, csrf_state))
            .path("/")
            .http_only(true)
            .max_age(time::Duration::minutes(STATE_MINUTES))
            .build(),
    );

    Ok((
        jar,
        (StatusCode::FOUND, [(header::LOCATION, url)]).into_response(),
    ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackParams {
    code: String,
    state: String,
}

pub async fn callback(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(provider): Path<String>,
    Query(params): Query<CallbackParams>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<ConnectionData>), ApiError> {
    let client = provider_client(&state, &provider)?;

    let expected = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
    if expected.as_deref() != Some(params.state.as_str()) || params.state.is_empty() {
        tracing::warn!(user_id = %user.id, provider = %provider, "OAuth state mismatch");
        return Err(ApiError::BadRequest("Invalid state".to_string()));
    }
    let jar = jar.add(expired_cookie(STATE_COOKIE));

    let token = client.exchange_code(&params.code).await?;
    let credential = state
        .oauth_service
        .reauthorize(&user.id, &provider, token)
        .await
        .map_err(ApiError::from)?;

    tracing::info!(user_id = %user.id, provider = %provider, "OAuth provider connected");

    let jar = persist_alert(jar, Alert::success("Dropbox connected"));
    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            ConnectionData {
                provider: credential.provider,
                token_type: credential.token.token_type,
                expiry: credential.token.expiry,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionData {
    pub provider: String,
    pub token_type: String,
    pub expiry: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilesParams {
    #[serde(default)]
    path: String,
}

pub async fn dropbox_files(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<FilesParams>,
) -> Result<ApiSuccess<DropboxListingData>, ApiError> {
    let credential = state
        .oauth_service
        .find(&user.id, DROPBOX_PROVIDER)
        .await
        .map_err(|e| match e {
            ModelError::NotFound => ApiError::NotFound("Dropbox is not connected".to_string()),
            other => ApiError::from(other),
        })?;

    let (folders, files) = state
        .dropbox
        .list_folder(&credential.token.access_token, &params.path)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DropboxListingData { folders, files },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropboxListingData {
    pub folders: Vec<DropboxFolder>,
    pub files: Vec<DropboxFile>,
}
