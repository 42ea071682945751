//! Transactional email delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport to send the
//! plain-text verification and password reset emails. Configuration is loaded
//! from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer should be built.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@actory.local";

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set.
    ///
    /// | Variable        | Required | Default                 |
    /// |-----------------|----------|-------------------------|
    /// | `SMTP_HOST`     | yes      |                         |
    /// | `SMTP_PORT`     | no       | `587`                   |
    /// | `SMTP_FROM`     | no       | `noreply@actory.local`  |
    /// | `SMTP_USER`     | no       |                         |
    /// | `SMTP_PASSWORD` | no       |                         |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Message templates
// ---------------------------------------------------------------------------

/// A rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

pub fn verification_email(name: &str, otp: &str, ttl_mins: i64) -> EmailContent {
    EmailContent {
        subject: "Actory - Verify your email".to_string(),
        body: format!(
            "Hi {name},\n\n\
             Your Actory verification code is: {otp}\n\n\
             The code expires in {ttl_mins} minutes. If you did not sign up, \
             you can ignore this email."
        ),
    }
}

pub fn password_reset_email(reset_url: &str, ttl_mins: i64) -> EmailContent {
    EmailContent {
        subject: "Actory - Password reset".to_string(),
        body: format!(
            "You requested a password reset for your Actory account.\n\n\
             Open the link below to choose a new password:\n{reset_url}\n\n\
             The link expires in {ttl_mins} minutes. If you did not request \
             this, you can ignore this email."
        ),
    }
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends transactional emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send a one-time verification code to a new registrant.
    pub async fn send_verification_code(
        &self,
        to_email: &str,
        name: &str,
        otp: &str,
        ttl_mins: i64,
    ) -> Result<(), EmailError> {
        self.send(to_email, verification_email(name, otp, ttl_mins))
            .await
    }

    /// Send a password reset link.
    pub async fn send_password_reset(
        &self,
        to_email: &str,
        reset_url: &str,
        ttl_mins: i64,
    ) -> Result<(), EmailError> {
        self.send(to_email, password_reset_email(reset_url, ttl_mins))
            .await
    }

    async fn send(&self, to_email: &str, content: EmailContent) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(content.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(content.body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = to_email, subject = %content.subject, "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn verification_email_contains_code_and_ttl() {
        let email = verification_email("Ada", "042137", 5);
        assert!(email.body.contains("042137"));
        assert!(email.body.contains("5 minutes"));
        assert!(email.body.starts_with("Hi Ada"));
    }

    #[test]
    fn reset_email_contains_link() {
        let email = password_reset_email("http://localhost:8080/reset-password/abc", 10);
        assert!(email.body.contains("/reset-password/abc"));
        assert!(email.subject.contains("Password reset"));
    }

    #[test]
    fn email_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = EmailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }

    #[tokio::test]
    async fn invalid_recipient_fails_before_connecting() {
        let delivery = EmailDelivery::new(EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 2525,
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            smtp_user: None,
            smtp_password: None,
        });
        let result = delivery
            .send_verification_code("not-an-email", "Ada", "123456", 5)
            .await;
        assert!(matches!(result, Err(EmailError::Address(_))));
    }
}
