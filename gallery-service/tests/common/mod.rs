use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Form;
use axum::Json;
use axum::Router;
use gallery_service::config::DropboxConfig;
use gallery_service::domain::gallery::service::GalleryService;
use gallery_service::domain::gallery::validator::GalleryValidator;
use gallery_service::domain::mail::errors::MailError;
use gallery_service::domain::mail::ports::Mailer;
use gallery_service::domain::oauth::service::OAuthService;
use gallery_service::domain::oauth::validator::OAuthValidator;
use gallery_service::domain::password_reset::service::PasswordResetService;
use gallery_service::domain::password_reset::validator::PasswordResetValidator;
use gallery_service::domain::user::models::User;
use gallery_service::domain::user::service::UserService;
use gallery_service::domain::user::validator::UserValidator;
use gallery_service::inbound::http::router::create_router;
use gallery_service::inbound::http::router::AppState;
use gallery_service::outbound::dropbox::DropboxClient;
use gallery_service::outbound::dropbox::DropboxOAuth;
use gallery_service::outbound::images::FilesystemImageStore;
use gallery_service::outbound::repositories::MemoryGalleryRepository;
use gallery_service::outbound::repositories::MemoryOAuthRepository;
use gallery_service::outbound::repositories::MemoryPasswordResetRepository;
use gallery_service::outbound::repositories::MemoryUserRepository;
use serde::Deserialize;
use serde_json::json;
use tempfile::TempDir;

pub const TEST_HASH_SECRET: &[u8] = b"test-hash-secret-key";

/// Mail captured instead of delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMail {
    Welcome { address: String },
    PasswordReset { address: String, token: String },
}

#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    /// Latest reset token mailed to `address`.
    pub fn reset_token_for(&self, address: &str) -> Option<String> {
        self.sent().into_iter().rev().find_map(|mail| match mail {
            SentMail::PasswordReset { address: to, token } if to == address => Some(token),
            _ => None,
        })
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_welcome(&self, _name: &str, address: &str) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(SentMail::Welcome {
            address: address.to_string(),
        });
        Ok(())
    }

    async fn send_password_reset(&self, user: &User, token: &str) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(SentMail::PasswordReset {
            address: user.email.clone(),
            token: token.to_string(),
        });
        Ok(())
    }
}

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub mailer: RecordingMailer,
    pub dropbox: FakeDropbox,
    pub images_dir: TempDir,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let images_dir = tempfile::tempdir().expect("Failed to create image directory");
        let mailer = RecordingMailer::default();

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator =
            Authenticator::new(TEST_HASH_SECRET).expect("Failed to create authenticator");

        let password_resets = Arc::new(PasswordResetService::new(
            Arc::new(PasswordResetValidator::new(
                MemoryPasswordResetRepository::new(),
                authenticator.clone(),
            )),
            chrono::Duration::minutes(720),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::new(UserValidator::new(
                MemoryUserRepository::new(),
                authenticator.clone(),
            )),
            password_resets,
            authenticator,
        ));
        let gallery_service = Arc::new(GalleryService::new(Arc::new(GalleryValidator::new(
            MemoryGalleryRepository::new(),
        ))));
        let oauth_service = Arc::new(OAuthService::new(Arc::new(OAuthValidator::new(
            MemoryOAuthRepository::new(),
        ))));

        let fake_dropbox = FakeDropbox::spawn().await;
        let dropbox = dropbox_config(&address, &fake_dropbox.address);
        let state = AppState {
            user_service,
            gallery_service,
            oauth_service,
            image_store: Arc::new(FilesystemImageStore::new(images_dir.path())),
            mailer: Arc::new(mailer.clone()),
            dropbox_oauth: Arc::new(
                DropboxOAuth::new(&dropbox).expect("Failed to create Dropbox OAuth client"),
            ),
            dropbox: Arc::new(DropboxClient::new(&dropbox)),
            remember_token_hours: 120,
        };

        let router = create_router(state, images_dir.path());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: Self::new_client(),
            mailer,
            dropbox: fake_dropbox,
            images_dir,
        }
    }

    /// A client with its own cookie jar, acting as a separate browser.
    pub fn new_client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create reqwest client")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make PATCH request
    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(self.url(path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Sign up through `client`, leaving it signed in.
    pub async fn signup_with(
        &self,
        client: &reqwest::Client,
        email: &str,
        password: &str,
    ) -> reqwest::Response {
        client
            .post(self.url("/api/signup"))
            .json(&json!({
                "first_name": "Jane",
                "last_name": "Doe",
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn signup(&self, email: &str, password: &str) -> reqwest::Response {
        self.signup_with(&self.api_client, email, password).await
    }

    /// Current user as seen by `client`, `Null` when anonymous.
    pub async fn me_with(&self, client: &reqwest::Client) -> serde_json::Value {
        let body: serde_json::Value = client
            .get(self.url("/api/me"))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");
        body["data"].clone()
    }

    /// Wait for the background welcome mail of `address`.
    pub async fn wait_for_welcome(&self, address: &str) -> bool {
        for _ in 0..50 {
            let delivered = self.mailer.sent().iter().any(|mail| {
                matches!(mail, SentMail::Welcome { address: to } if to == address)
            });
            if delivered {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }
}

fn dropbox_config(address: &str, dropbox_address: &str) -> DropboxConfig {
    DropboxConfig {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        auth_url: "https://www.dropbox.com/oauth2/authorize".to_string(),
        token_url: format!("{}/oauth2/token", dropbox_address),
        redirect_url: format!("{}/api/oauth/dropbox/callback", address),
        api_url: format!("{}/2", dropbox_address),
    }
}

#[derive(Default)]
struct FakeDropboxState {
    exchanged_codes: Vec<String>,
    bearer_tokens: Vec<String>,
}

/// Stand-in for the Dropbox token endpoint and files API.
///
/// Each code exchange issues `access-<n>`. Listing `/photos` answers in two
/// pages joined by a cursor.
#[derive(Clone)]
pub struct FakeDropbox {
    pub address: String,
    state: Arc<Mutex<FakeDropboxState>>,
}

#[derive(Deserialize)]
struct ListFolderBody {
    path: String,
}

#[derive(Deserialize)]
struct ContinueBody {
    cursor: String,
}

impl FakeDropbox {
    async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(FakeDropboxState::default()));

        let router = Router::new()
            .route("/oauth2/token", post(Self::token))
            .route("/2/files/list_folder", post(Self::list_folder))
            .route("/2/files/list_folder/continue", post(Self::list_folder_continue))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    /// Codes the service exchanged, in order.
    pub fn exchanged_codes(&self) -> Vec<String> {
        self.state.lock().unwrap().exchanged_codes.clone()
    }

    /// Bearer tokens presented to the files API, in order.
    pub fn bearer_tokens(&self) -> Vec<String> {
        self.state.lock().unwrap().bearer_tokens.clone()
    }

    async fn token(
        State(state): State<Arc<Mutex<FakeDropboxState>>>,
        Form(form): Form<std::collections::HashMap<String, String>>,
    ) -> Result<Json<serde_json::Value>, StatusCode> {
        if form.get("grant_type").map(String::as_str) != Some("authorization_code") {
            return Err(StatusCode::BAD_REQUEST);
        }
        let code = form.get("code").cloned().ok_or(StatusCode::BAD_REQUEST)?;

        let mut state = state.lock().unwrap();
        state.exchanged_codes.push(code);
        let n = state.exchanged_codes.len();

        Ok(Json(json!({
            "access_token": format!("access-{}", n),
            "token_type": "bearer",
            "expires_in": 14400,
            "refresh_token": format!("refresh-{}", n)
        })))
    }

    fn record_bearer(
        state: &Mutex<FakeDropboxState>,
        headers: &HeaderMap,
    ) -> Result<(), StatusCode> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(StatusCode::UNAUTHORIZED)?;
        state.lock().unwrap().bearer_tokens.push(token.to_string());
        Ok(())
    }

    async fn list_folder(
        State(state): State<Arc<Mutex<FakeDropboxState>>>,
        headers: HeaderMap,
        Json(body): Json<ListFolderBody>,
    ) -> Result<Json<serde_json::Value>, StatusCode> {
        Self::record_bearer(&state, &headers)?;
        if body.path != "/photos" {
            return Ok(Json(json!({ "entries": [], "cursor": "end", "has_more": false })));
        }

        Ok(Json(json!({
            "entries": [
                { ".tag": "folder", "name": "Summer", "path_lower": "/photos/summer" },
                { ".tag": "file", "name": "cover.jpg", "path_lower": "/photos/cover.jpg" }
            ],
            "cursor": "page-2",
            "has_more": true
        })))
    }

    async fn list_folder_continue(
        State(state): State<Arc<Mutex<FakeDropboxState>>>,
        headers: HeaderMap,
        Json(body): Json<ContinueBody>,
    ) -> Result<Json<serde_json::Value>, StatusCode> {
        Self::record_bearer(&state, &headers)?;
        if body.cursor != "page-2" {
            return Err(StatusCode::CONFLICT);
        }

        Ok(Json(json!({
            "entries": [
                { ".tag": "deleted", "name": "old.png", "path_lower": "/photos/old.png" },
                { ".tag": "file", "name": "beach.png", "path_lower": "/photos/beach.png" }
            ],
            "cursor": "end",
            "has_more": false
        })))
    }
}

/// Value of the `token` cookie set by a response, if any.
pub fn token_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name() == "token")
        .map(|cookie| cookie.value().to_string())
}
