use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::models::DocumentId;

/// Delivers the completion notice for a finished document
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, recipient: &str, document_id: &DocumentId) -> Result<()>;
}

/// Emails the recipient a link to the finished transcript
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    public_base_url: String,
}

impl EmailNotifier {
    pub fn new(
        host: &str,
        username: String,
        password: String,
        from: String,
        public_base_url: String,
    ) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .with_context(|| format!("Failed to configure SMTP relay: {}", host))?
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self {
            transport,
            from,
            public_base_url,
        })
    }

    fn body(&self, document_id: &DocumentId) -> String {
        let link = format!("{}/transcription/{}", self.public_base_url, document_id);
        format!(
            "Your audio file has finished processing. Click the link below to add \
             the finishing touches to your generated transcript.\n\n{}",
            link
        )
    }
}

#[async_trait]
impl NotificationSink for EmailNotifier {
    async fn notify(&self, recipient: &str, document_id: &DocumentId) -> Result<()> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .with_context(|| format!("Invalid sender address: {}", self.from))?,
            )
            .to(recipient
                .parse()
                .with_context(|| format!("Invalid recipient address: {}", recipient))?)
            .subject("Your transcript is ready")
            .header(ContentType::TEXT_PLAIN)
            .body(self.body(document_id))
            .context("Failed to build notification mail")?;

        self.transport
            .send(message)
            .await
            .context("Failed to send notification mail")?;

        Ok(())
    }
}
