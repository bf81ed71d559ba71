use anyhow::Context as _;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::RecoveryConfig;
use crate::domain::repository::Mailer;
use crate::domain::types::RESET_CODE_TTL_SECS;

/// SMTP delivery for reset codes (STARTTLS relay with credential auth).
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &RecoveryConfig) -> Result<Self, anyhow::Error> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .context("build SMTP transport")?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: config.smtp_from.clone(),
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), anyhow::Error> {
        let minutes = RESET_CODE_TTL_SECS / 60;
        let body = format!(
            "Your Banter password reset code is {code}.\n\n\
             It expires in {minutes} minutes. If you did not request a \
             password reset, you can ignore this email.\n"
        );

        let message = Message::builder()
            .from(self.from.parse().context("invalid from address")?)
            .to(to.parse().context("invalid to address")?)
            .subject("Your Banter password reset code")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("build reset code email")?;

        self.transport
            .send(message)
            .await
            .context("send reset code email")?;
        Ok(())
    }
}
