use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::Address;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use crate::config::SmtpConfig;
use crate::domain::session::errors::NotificationError;
use crate::domain::session::models::LoginNotice;
use crate::domain::session::ports::LoginNotifier;

const LOGIN_NOTICE_SUBJECT: &str = "New sign-in to your account";

/// Delivers login notices over SMTP.
pub struct SmtpLoginNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpLoginNotifier {
    /// Create a notifier from SMTP configuration.
    ///
    /// With credentials the relay is reached over TLS; without them a plain
    /// connection is used (local mail catchers).
    pub fn new(config: &SmtpConfig) -> Result<Self, anyhow::Error> {
        tracing::info!(
            host = %config.host,
            port = config.port,
            authenticated = config.username.is_some(),
            "Initializing SMTP login notifier"
        );

        let builder = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
                    .credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
        };

        let mailer = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        let sender = Mailbox::new(
            Some(config.from_name.clone()),
            Address::from_str(&config.from_email)?,
        );

        Ok(Self { mailer, sender })
    }

    fn build_message(&self, notice: &LoginNotice) -> Result<Message, NotificationError> {
        let address = Address::from_str(&notice.email)
            .map_err(|e| NotificationError::InvalidRecipient(e.to_string()))?;
        let recipient = Mailbox::new(Some(notice.display_name.clone()), address);

        Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(LOGIN_NOTICE_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(login_notice_text(notice))
            .map_err(|e| NotificationError::MessageBuildFailed(e.to_string()))
    }
}

fn login_notice_text(notice: &LoginNotice) -> String {
    format!(
        "Hi {},\n\nYour account was just signed in to at {}.\n\nIf this wasn't you, change your password right away.\n",
        notice.display_name,
        notice.logged_in_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

#[async_trait]
impl LoginNotifier for SmtpLoginNotifier {
    async fn send_login_notice(&self, notice: &LoginNotice) -> Result<(), NotificationError> {
        let message = self.build_message(notice)?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| NotificationError::DeliveryFailed(e.to_string()))?;

        tracing::debug!(recipient = %notice.email, "Login notice sent over SMTP");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: None,
            password: None,
            from_name: "Sessions".to_string(),
            from_email: "no-reply@example.com".to_string(),
            timeout_secs: 5,
        }
    }

    fn notice(email: &str) -> LoginNotice {
        LoginNotice {
            display_name: "Arli".to_string(),
            email: email.to_string(),
            logged_in_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_message_is_addressed_to_user() {
        let notifier = SmtpLoginNotifier::new(&config()).expect("Failed to build notifier");

        let message = notifier
            .build_message(&notice("arli@mail.com"))
            .expect("Failed to build message");

        let recipients: Vec<String> = message
            .envelope()
            .to()
            .iter()
            .map(|address| address.to_string())
            .collect();
        assert_eq!(recipients, vec!["arli@mail.com".to_string()]);

        let formatted = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(formatted.contains("To: Arli <arli@mail.com>"));
        assert!(formatted.contains(LOGIN_NOTICE_SUBJECT));
        assert!(formatted.contains("Hi Arli"));
    }

    #[tokio::test]
    async fn test_invalid_recipient() {
        let notifier = SmtpLoginNotifier::new(&config()).expect("Failed to build notifier");

        let result = notifier.build_message(&notice("not-an-email"));
        assert!(matches!(result, Err(NotificationError::InvalidRecipient(_))));
    }

    #[tokio::test]
    async fn test_invalid_sender_rejected() {
        let mut config = config();
        config.from_email = "nobody".to_string();

        assert!(SmtpLoginNotifier::new(&config).is_err());
    }
}
