use thiserror::Error;

/// Error type for random token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    #[error("Token is not valid base64: {0}")]
    MalformedToken(String),
}
