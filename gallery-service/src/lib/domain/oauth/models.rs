use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::ModelError;
use crate::domain::user::models::UserId;

pub const DROPBOX_PROVIDER: &str = "dropbox";

/// Providers a user may connect.
pub const SUPPORTED_PROVIDERS: &[&str] = &[DROPBOX_PROVIDER];

/// Token material granted by a provider; persisted as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

/// Provider authorization held for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredential {
    pub id: OAuthId,
    pub user_id: UserId,
    pub provider: String,
    pub token: OAuthToken,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OAuthCredential {
    pub fn new(user_id: UserId, provider: String, token: OAuthToken) -> Self {
        let now = Utc::now();
        Self {
            id: OAuthId::new(),
            user_id,
            provider,
            token,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OAuthId(pub Uuid);

impl OAuthId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, ModelError> {
        Uuid::parse_str(s)
            .map(OAuthId)
            .map_err(|_| ModelError::InvalidId)
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for OAuthId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OAuthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
