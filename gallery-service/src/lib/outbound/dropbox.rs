//! Dropbox integration: OAuth2 authorization code flow and folder listing.

use chrono::Utc;
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::AuthUrl;
use oauth2::AuthorizationCode;
use oauth2::ClientId;
use oauth2::ClientSecret;
use oauth2::CsrfToken;
use oauth2::RedirectUrl;
use oauth2::TokenResponse;
use oauth2::TokenType;
use oauth2::TokenUrl;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::config::DropboxConfig;
use crate::domain::oauth::models::OAuthToken;

#[derive(Debug, Error)]
pub enum DropboxError {
    #[error("Invalid Dropbox configuration: {0}")]
    Config(String),

    #[error("Code exchange failed: {0}")]
    Exchange(String),

    #[error("Dropbox request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Dropbox API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// OAuth2 client for the Dropbox authorization code flow.
#[derive(Clone)]
pub struct DropboxOAuth {
    client: BasicClient,
}

impl DropboxOAuth {
    pub fn new(config: &DropboxConfig) -> Result<Self, DropboxError> {
        let auth_url =
            AuthUrl::new(config.auth_url.clone()).map_err(|e| DropboxError::Config(e.to_string()))?;
        let token_url = TokenUrl::new(config.token_url.clone())
            .map_err(|e| DropboxError::Config(e.to_string()))?;
        let redirect_url = RedirectUrl::new(config.redirect_url.clone())
            .map_err(|e| DropboxError::Config(e.to_string()))?;

        let client = BasicClient::new(
            ClientId::new(config.client_id.clone()),
            Some(ClientSecret::new(config.client_secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_redirect_uri(redirect_url);

        Ok(Self { client })
    }

    /// Authorization URL carrying `state`, requesting a refresh token.
    pub fn authorize_url(&self, state: &str) -> String {
        let state = state.to_string();
        let (url, _) = self
            .client
            .authorize_url(move || CsrfToken::new(state))
            .add_extra_param("token_access_type", "offline")
            .url();

        url.to_string()
    }

    pub async fn exchange_code(&self, code: &str) -> Result<OAuthToken, DropboxError> {
        tracing::debug!("Exchanging Dropbox authorization code");

        let response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| DropboxError::Exchange(e.to_string()))?;

        let expiry = response
            .expires_in()
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .map(|d| Utc::now() + d);

        Ok(OAuthToken {
            access_token: response.access_token().secret().clone(),
            token_type: response.token_type().as_ref().to_string(),
            refresh_token: response.refresh_token().map(|t| t.secret().clone()),
            expiry,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropboxFolder {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropboxFile {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Deserialize)]
struct ListFolderResponse {
    entries: Vec<Entry>,
    cursor: String,
    has_more: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = ".tag", rename_all = "lowercase")]
enum Entry {
    File { name: String, path_lower: String },
    Folder { name: String, path_lower: String },
    #[serde(other)]
    Other,
}

/// Client for the Dropbox HTTP API.
#[derive(Clone)]
pub struct DropboxClient {
    http: reqwest::Client,
    api_url: String,
}

impl DropboxClient {
    pub fn new(config: &DropboxConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Folders and files directly under `path` ("" for the root).
    pub async fn list_folder(
        &self,
        access_token: &str,
        path: &str,
    ) -> Result<(Vec<DropboxFolder>, Vec<DropboxFile>), DropboxError> {
        let mut folders = Vec::new();
        let mut files = Vec::new();

        let mut page: ListFolderResponse = self
            .post(access_token, "files/list_folder", json!({ "path": path }))
            .await?;
        loop {
            collect_entries(page.entries, &mut folders, &mut files);
            if !page.has_more {
                break;
            }
            page = self
                .post(
                    access_token,
                    "files/list_folder/continue",
                    json!({ "cursor": page.cursor }),
                )
                .await?;
        }

        tracing::debug!(
            path,
            folders = folders.len(),
            files = files.len(),
            "Listed Dropbox folder"
        );
        Ok((folders, files))
    }

    async fn post(
        &self,
        access_token: &str,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<ListFolderResponse, DropboxError> {
        let response = self
            .http
            .post(format!("{}/{}", self.api_url, endpoint))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DropboxError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

fn collect_entries(entries: Vec<Entry>, folders: &mut Vec<DropboxFolder>, files: &mut Vec<DropboxFile>) {
    for entry in entries {
        match entry {
            Entry::File { name, path_lower } => files.push(DropboxFile {
                name,
                path: path_lower,
            }),
            Entry::Folder { name, path_lower } => folders.push(DropboxFolder {
                name,
                path: path_lower,
            }),
            Entry::Other => {}
        }
    }
}
