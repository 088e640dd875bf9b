use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::ModelError;

/// User aggregate entity.
///
/// `password` and `remember_token` are transient: they carry raw values
/// through the validation pipeline and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Option<String>,
    pub password_hash: String,
    pub remember_token: Option<String>,
    pub remember_token_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// New, not yet persisted user carrying the raw password.
    pub fn new(first_name: String, last_name: String, email: String, password: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            first_name,
            last_name,
            email,
            password: Some(password),
            password_hash: String::new(),
            remember_token: None,
            remember_token_hash: String::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidId` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ModelError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|_| ModelError::InvalidId)
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command for signing up a user. Fields are raw and validated downstream.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl CreateUserCommand {
    pub fn new(first_name: String, last_name: String, email: String, password: String) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password,
        }
    }
}

/// Command for updating a user. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserCommand {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Outcome of a forgot-password request: the user to notify and the raw
/// reset token to send them.
#[derive(Debug, Clone)]
pub struct PasswordResetTicket {
    pub user: User,
    pub token: String,
}
