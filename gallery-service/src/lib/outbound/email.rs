use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use crate::config::AppConfig;
use crate::config::SmtpConfig;
use crate::domain::mail::errors::MailError;
use crate::domain::mail::ports::Mailer;
use crate::domain::user::models::User;

/// Mailer delivering over SMTP.
///
/// With an empty `smtp.host` nothing is sent. Only the recipient and subject
/// are logged, since reset mails carry a live token.
pub struct SmtpMailer {
    smtp: SmtpConfig,
    base_url: String,
}

impl SmtpMailer {
    pub fn new(smtp: SmtpConfig, app: &AppConfig) -> Self {
        Self {
            smtp,
            base_url: app.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn reset_url(&self, token: &str) -> Result<String, MailError> {
        reqwest::Url::parse_with_params(
            &format!("{}/password/reset", self.base_url),
            &[("token", token)],
        )
        .map(String::from)
        .map_err(|e| MailError::BuildFailed(e.to_string()))
    }

    async fn send(
        &self,
        subject: &str,
        to_name: &str,
        to_address: &str,
        plain: String,
        html: String,
    ) -> Result<(), MailError> {
        if self.smtp.host.is_empty() {
            tracing::warn!(to = to_address, subject, "SMTP not configured, email not sent");
            return Ok(());
        }

        let from: Mailbox = self
            .smtp
            .from
            .parse()
            .map_err(|_| MailError::InvalidAddress(self.smtp.from.clone()))?;
        let to = Mailbox::new(
            Some(to_name.to_string()),
            to_address
                .parse()
                .map_err(|_| MailError::InvalidAddress(to_address.to_string()))?,
        );

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(plain, html))
            .map_err(|e| MailError::BuildFailed(e.to_string()))?;

        let credentials = Credentials::new(self.smtp.username.clone(), self.smtp.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.smtp.host)
            .map_err(|e| MailError::DeliveryFailed(e.to_string()))?
            .port(self.smtp.port)
            .credentials(credentials)
            .build();

        transport
            .send(email)
            .await
            .map_err(|e| MailError::DeliveryFailed(e.to_string()))?;

        tracing::info!(to = to_address, subject, "Email sent");
        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_welcome(&self, name: &str, address: &str) -> Result<(), MailError> {
        let plain = format!(
            "Hello {},\n\nWelcome to the gallery! Visit {} to create your first gallery.",
            name, self.base_url
        );
        let html = format!(
            "<h1>Welcome, {}!</h1><p>Visit <a href=\"{}\">the gallery</a> to create your first gallery.</p>",
            name, self.base_url
        );

        self.send("Welcome to the gallery", name, address, plain, html)
            .await
    }

    async fn send_password_reset(&self, user: &User, token: &str) -> Result<(), MailError> {
        let url = self.reset_url(token)?;
        let plain = format!(
            "Hello {},\n\nWe received a request to reset your password. \
             You can choose a new one here:\n\n{}\n\n\
             If you did not ask for this, ignore this email.",
            user.first_name, url
        );
        let html = format!(
            "<h1>Hello, {}.</h1>\
             <p>We received a request to reset your password.</p>\
             <p>You can choose a new one <a href=\"{}\">here</a>.</p>",
            user.first_name, url
        );

        self.send(
            "Reset your password",
            &user.full_name(),
            &user.email,
            plain,
            html,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> SmtpMailer {
        SmtpMailer::new(
            SmtpConfig {
                host: String::new(),
                port: 587,
                username: String::new(),
                password: String::new(),
                from: "Gallery <no-reply@localhost>".to_string(),
            },
            &AppConfig {
                base_url: "http://localhost:3000/".to_string(),
            },
        )
    }

    #[test]
    fn test_reset_url() {
        assert_eq!(
            mailer().reset_url("abc").unwrap(),
            "http://localhost:3000/password/reset?token=abc"
        );
        assert!(mailer()
            .reset_url("a+b=")
            .unwrap()
            .ends_with("token=a%2Bb%3D"));
    }

    #[tokio::test]
    async fn test_unconfigured_host_logs_instead_of_sending() {
        let result = mailer()
            .send_welcome("Jane Doe", "jane@example.com")
            .await;

        assert!(result.is_ok());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unconfigured_host_keeps_reset_token_out_of_logs() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let user = User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "jane@example.com".to_string(),
            String::new(),
        );
        mailer()
            .send_password_reset(&user, "live-reset-token")
            .await
            .unwrap();

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Reset your password"));
        assert!(output.contains("jane@example.com"));
        assert!(!output.contains("live-reset-token"));
    }
}
