use thiserror::Error;

/// Input rejected by a validation pipeline.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email address is not valid")]
    EmailFormat,

    #[error("Email address is already taken")]
    EmailTaken,

    #[error("Password should be at least 8 characters")]
    PasswordTooShort,

    #[error("Password can not be empty")]
    PasswordRequired,

    #[error("Title is required")]
    TitleRequired,

    #[error("User ID is required")]
    OwnerRequired,

    #[error("Provider is empty")]
    ProviderEmpty,

    #[error("Provider not supported")]
    ProviderUnsupported,

    #[error("Remember token must be at least 32 bytes")]
    TokenTooShort,

    #[error("Remember token hash is required")]
    TokenHashMissing,

    #[error("Image file name is not valid")]
    ImageNameInvalid,
}

/// Top-level error for every model operation (stores, validators, services).
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid ID provided")]
    InvalidId,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Password is incorrect")]
    PasswordIncorrect,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ModelError {
    /// Message safe to show to end users.
    ///
    /// Unexpected failures collapse to a generic message; the detail is only
    /// ever logged.
    pub fn public_message(&self) -> String {
        match self {
            ModelError::Unexpected(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound)
    }
}

impl From<anyhow::Error> for ModelError {
    fn from(err: anyhow::Error) -> Self {
        ModelError::Unexpected(err.to_string())
    }
}

impl From<sqlx::Error> for ModelError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ModelError::NotFound,
            other => ModelError::Unexpected(other.to_string()),
        }
    }
}

impl From<auth::TokenError> for ModelError {
    fn from(err: auth::TokenError) -> Self {
        ModelError::Unexpected(format!("Token generation failed: {}", err))
    }
}

impl From<auth::PasswordError> for ModelError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::Mismatch => ModelError::PasswordIncorrect,
            other => ModelError::Unexpected(format!("Password hashing failed: {}", other)),
        }
    }
}

impl From<auth::AuthenticationError> for ModelError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => ModelError::PasswordIncorrect,
            auth::AuthenticationError::PasswordError(e) => e.into(),
            auth::AuthenticationError::TokenError(e) => e.into(),
            auth::AuthenticationError::HashError(e) => ModelError::Unexpected(e.to_string()),
        }
    }
}
