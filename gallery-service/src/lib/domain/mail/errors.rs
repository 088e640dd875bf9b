use thiserror::Error;

/// Error for outgoing mail delivery
#[derive(Debug, Clone, Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    BuildFailed(String),

    #[error("Failed to deliver message: {0}")]
    DeliveryFailed(String),
}
