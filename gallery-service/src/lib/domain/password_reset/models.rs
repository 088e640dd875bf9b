use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::ModelError;
use crate::domain::user::models::UserId;

/// Pending password-reset request of a user.
///
/// `token` holds the raw value only on the record returned by creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub id: PasswordResetId,
    pub user_id: UserId,
    pub token: Option<String>,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PasswordReset {
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: PasswordResetId::new(),
            user_id,
            token: None,
            token_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the request is older than `ttl` at `now`.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.created_at + ttl < now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PasswordResetId(pub Uuid);

impl PasswordResetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, ModelError> {
        Uuid::parse_str(s)
            .map(PasswordResetId)
            .map_err(|_| ModelError::InvalidId)
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for PasswordResetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PasswordResetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
