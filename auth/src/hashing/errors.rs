use thiserror::Error;

/// Error type for keyed token hashing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("Hash secret key must not be empty")]
    EmptySecret,

    #[error("Hash secret key rejected: {0}")]
    InvalidSecret(String),
}
