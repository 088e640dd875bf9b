use async_trait::async_trait;

use crate::domain::mail::errors::MailError;
use crate::domain::user::models::User;

/// Outgoing transactional mail.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Greet a newly signed-up user.
    ///
    /// # Arguments
    /// * `name` - Recipient display name
    /// * `address` - Recipient email address
    async fn send_welcome(&self, name: &str, address: &str) -> Result<(), MailError>;

    /// Send the link that completes a password reset.
    ///
    /// # Arguments
    /// * `user` - Recipient
    /// * `token` - Raw reset token embedded in the link
    async fn send_password_reset(&self, user: &User, token: &str) -> Result<(), MailError>;
}
